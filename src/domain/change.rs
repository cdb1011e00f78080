#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub filename: String,
    pub additions: u64,
    pub deletions: u64,
    pub patch: Option<String>,
}

struct KeywordRule {
    needles: &'static [&'static str],
    label: &'static str,
}

const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        needles: &["class "],
        label: "Modified class definitions in",
    },
    KeywordRule {
        needles: &["function ", "def "],
        label: "Updated functions in",
    },
    KeywordRule {
        needles: &["import "],
        label: "Changed imports in",
    },
    KeywordRule {
        needles: &["test"],
        label: "Modified tests in",
    },
    KeywordRule {
        needles: &["config"],
        label: "Updated configuration in",
    },
];

const MAX_EXAMPLES: usize = 3;

struct ExtensionGroup<'a> {
    extension: String,
    count: usize,
    examples: Vec<&'a str>,
}

/// Describes what changed across `files`, keyword tags first, then one tag per extension.
pub fn classify(files: &[FileDiff]) -> Vec<String> {
    let mut changes = Vec::new();
    let mut groups: Vec<ExtensionGroup<'_>> = Vec::new();

    for file in files {
        let extension = extension_of(&file.filename);
        match groups.iter_mut().find(|group| group.extension == extension) {
            Some(group) => {
                group.count += 1;
                if group.examples.len() < MAX_EXAMPLES {
                    group.examples.push(&file.filename);
                }
            }
            None => groups.push(ExtensionGroup {
                extension,
                count: 1,
                examples: vec![file.filename.as_str()],
            }),
        }

        if let Some(patch) = &file.patch {
            for rule in KEYWORD_RULES {
                if rule.needles.iter().any(|needle| patch.contains(needle)) {
                    changes.push(format!("{} {}", rule.label, file.filename));
                }
            }
        }
    }

    for group in groups {
        if group.count == 1 {
            changes.push(format!("Modified {}", group.examples[0]));
        } else {
            changes.push(format!(
                "Modified {} {} files (e.g., {})",
                group.count,
                group.extension,
                group.examples.join(", ")
            ));
        }
    }

    dedup_preserving_order(changes)
}

pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

fn extension_of(filename: &str) -> String {
    let name = filename.rsplit('/').next().unwrap_or(filename);
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(filename: &str, patch: Option<&str>) -> FileDiff {
        FileDiff {
            filename: filename.to_string(),
            additions: 1,
            deletions: 0,
            patch: patch.map(str::to_string),
        }
    }

    #[test]
    fn tags_keywords_in_pattern_order() {
        let changes = classify(&[diff(
            "src/app.py",
            Some("+import os\n+class App:\n+    def run(self):"),
        )]);
        assert_eq!(
            changes,
            vec![
                "Modified class definitions in src/app.py",
                "Updated functions in src/app.py",
                "Changed imports in src/app.py",
                "Modified src/app.py",
            ]
        );
    }

    #[test]
    fn missing_patch_yields_only_extension_tag() {
        let changes = classify(&[diff("assets/logo.png", None)]);
        assert_eq!(changes, vec!["Modified assets/logo.png"]);
    }

    #[test]
    fn aggregates_files_by_extension() {
        let changes = classify(&[
            diff("a.RS", None),
            diff("b.rs", None),
            diff("README.md", None),
            diff("c.rs", None),
            diff("d.rs", None),
        ]);
        assert_eq!(
            changes,
            vec![
                "Modified 4 rs files (e.g., a.RS, b.rs, c.rs)",
                "Modified README.md",
            ]
        );
    }

    #[test]
    fn files_without_extension_share_unknown_bucket() {
        let changes = classify(&[diff("Makefile", None), diff("docker.d/Dockerfile", None)]);
        assert_eq!(
            changes,
            vec!["Modified 2 unknown files (e.g., Makefile, docker.d/Dockerfile)"]
        );
    }

    #[test]
    fn output_has_no_duplicates_and_keeps_first_occurrence() {
        let changes = classify(&[
            diff("config.rs", Some("+// test config")),
            diff("config.rs", Some("+// test config")),
        ]);
        assert_eq!(
            changes,
            vec![
                "Modified tests in config.rs",
                "Updated configuration in config.rs",
                "Modified 2 rs files (e.g., config.rs, config.rs)",
            ]
        );
    }

    #[test]
    fn empty_input_has_no_changes() {
        assert!(classify(&[]).is_empty());
    }
}
