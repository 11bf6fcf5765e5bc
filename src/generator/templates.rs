//! Auxiliary files written next to the root package.
//!
//! These are unrelated to the package graph; they give a fresh checkout the
//! ignore rules and formatting settings every package in the family shares.

/// A template file, relative to the root package directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuxiliaryFile {
    pub name: &'static str,
    pub contents: &'static str,
}

const GITIGNORE: &str = "\
# Generated project files
/target/
/build/
*.project.json

# IDE and editor state
.vs/
.vscode/
.idea/
*.user

# Build artifacts
*.o
*.obj
*.a
*.lib
*.exe
";

const CLANG_FORMAT: &str = "\
BasedOnStyle: Microsoft
Language: Cpp
IndentWidth: 4
ColumnLimit: 0
AlignConsecutiveAssignments: true
AlignConsecutiveDeclarations: true
AllowShortFunctionsOnASingleLine: Inline
BreakBeforeBraces: Allman
PointerAlignment: Left
SortIncludes: false
";

/// All auxiliary templates.
pub const AUXILIARY_FILES: &[AuxiliaryFile] = &[
    AuxiliaryFile {
        name: ".gitignore",
        contents: GITIGNORE,
    },
    AuxiliaryFile {
        name: ".clang-format",
        contents: CLANG_FORMAT,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_distinct_and_non_empty() {
        assert_eq!(AUXILIARY_FILES.len(), 2);
        for file in AUXILIARY_FILES {
            assert!(file.name.starts_with('.'));
            assert!(file.contents.ends_with('\n'));
        }
        assert!(AUXILIARY_FILES[0].contents.contains("/target/"));
    }
}
