// syntax/profile.rs - Built-in syntax profiles and filename-based selection

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightFlags {
    pub numbers: bool,
    pub strings: bool,
}

/// Immutable highlighting rules for one language.
#[derive(Debug, PartialEq, Eq)]
pub struct SyntaxProfile {
    pub name: &'static str,
    /// Patterns starting with `.` match the filename suffix; others match anywhere
    pub filematch: &'static [&'static str],
    /// Control keywords
    pub keywords: &'static [&'static str],
    /// Type keywords, highlighted in a second color
    pub types: &'static [&'static str],
    pub singleline_comment: Option<&'static str>,
    pub multiline_comment: Option<(&'static str, &'static str)>,
    pub flags: HighlightFlags,
}

impl SyntaxProfile {
    pub fn matches(&self, filename: &str) -> bool {
        let name = std::path::Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(filename);
        self.filematch.iter().any(|pattern| {
            if pattern.starts_with('.') {
                name.ends_with(pattern)
            } else {
                name.contains(pattern)
            }
        })
    }
}

static C_PROFILE: SyntaxProfile = SyntaxProfile {
    name: "c",
    filematch: &[".c", ".h", ".cpp", ".hpp", ".cc"],
    keywords: &[
        "auto", "break", "case", "continue", "default", "do", "else", "enum", "extern", "for",
        "goto", "if", "register", "return", "sizeof", "static", "struct", "switch", "typedef",
        "union", "volatile", "while", "NULL", "alignas", "alignof", "and", "and_eq", "asm",
        "bitand", "bitor", "class", "compl", "constexpr", "const_cast", "decltype", "delete",
        "dynamic_cast", "explicit", "export", "false", "friend", "inline", "mutable",
        "namespace", "new", "noexcept", "not", "not_eq", "nullptr", "operator", "or", "or_eq",
        "private", "protected", "public", "reinterpret_cast", "static_assert", "static_cast",
        "template", "this", "thread_local", "throw", "true", "try", "typeid", "typename",
        "virtual", "xor", "xor_eq",
    ],
    types: &[
        "int", "long", "double", "float", "char", "unsigned", "signed", "void", "short", "const",
        "bool",
    ],
    singleline_comment: Some("//"),
    multiline_comment: Some(("/*", "*/")),
    flags: HighlightFlags {
        numbers: true,
        strings: true,
    },
};

static RUST_PROFILE: SyntaxProfile = SyntaxProfile {
    name: "rust",
    filematch: &[".rs"],
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod",
        "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
        "trait", "true", "type", "unsafe", "use", "where", "while",
    ],
    types: &[
        "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
        "f32", "f64", "bool", "char", "str", "String", "Vec", "Option", "Result", "Box",
    ],
    singleline_comment: Some("//"),
    multiline_comment: Some(("/*", "*/")),
    flags: HighlightFlags {
        numbers: true,
        strings: true,
    },
};

static PYTHON_PROFILE: SyntaxProfile = SyntaxProfile {
    name: "python",
    filematch: &[".py"],
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in",
        "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
        "with", "yield", "None", "True", "False",
    ],
    types: &[
        "int", "float", "str", "bool", "list", "dict", "set", "tuple", "bytes", "object",
    ],
    singleline_comment: Some("#"),
    multiline_comment: None,
    flags: HighlightFlags {
        numbers: true,
        strings: true,
    },
};

static BUILTIN_PROFILES: [&SyntaxProfile; 3] = [&C_PROFILE, &RUST_PROFILE, &PYTHON_PROFILE];

pub fn builtin_profiles() -> &'static [&'static SyntaxProfile] {
    &BUILTIN_PROFILES
}

/// Pick the first built-in profile whose patterns match `filename`.
pub fn select_profile(filename: &str) -> Option<&'static SyntaxProfile> {
    let profile = builtin_profiles()
        .iter()
        .copied()
        .find(|profile| profile.matches(filename));
    debug!(
        "Syntax profile for {}: {}",
        filename,
        profile.map(|p| p.name).unwrap_or("none")
    );
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_by_extension() {
        assert_eq!(select_profile("main.c").map(|p| p.name), Some("c"));
        assert_eq!(select_profile("include/util.h").map(|p| p.name), Some("c"));
        assert_eq!(select_profile("lib.rs").map(|p| p.name), Some("rust"));
        assert_eq!(select_profile("setup.py").map(|p| p.name), Some("python"));
        assert!(select_profile("notes.txt").is_none());
    }

    #[test]
    fn test_suffix_pattern_requires_suffix() {
        // ".c" must not match a name that merely contains it
        assert!(select_profile("archive.c.bak").is_none());
        assert_eq!(select_profile("x.cc").map(|p| p.name), Some("c"));
    }

    #[test]
    fn test_directory_names_are_ignored() {
        assert!(select_profile("src.rs/README").is_none());
    }

    #[test]
    fn test_profiles_have_distinct_names() {
        let names: Vec<_> = builtin_profiles().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["c", "rust", "python"]);
    }
}
