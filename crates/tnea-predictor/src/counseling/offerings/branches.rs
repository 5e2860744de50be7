use std::collections::{BTreeSet, HashMap};

pub const ALL_BRANCHES: &str = "All Branches";

const STANDARD_BRANCHES: &[(&str, &[&str])] = &[
    (
        "CSE",
        &[
            "COMPUTER SCIENCE AND ENGINEERING",
            "COMPUTER SCIENCE AND ENGINEERING (SS)",
            "COMPUTER SCIENCE AND ENGINEERING (TAMIL)",
            "COMPUTER SCIENCE AND BUSSINESS SYSTEM",
            "Computer Science and Business System (SS)",
            "COMPUTER SCIENCE AND DESIGN",
        ],
    ),
    (
        "IT",
        &[
            "INFORMATION TECHNOLOGY",
            "INFORMATION TECHNOLOGY (SS)",
            "Information Technology",
        ],
    ),
    (
        "ECE",
        &[
            "ELECTRONICS AND COMMUNICATION ENGINEERING",
            "ELECTRONICS AND COMMUNICATION ENGINEERING (SS)",
            "Electronics and Communication (Advanced Communication Technology)",
        ],
    ),
    (
        "EEE",
        &[
            "ELECTRICAL AND ELECTRONICS ENGINEERING",
            "ELECTRICAL AND ELECTRONICS ENGINEERING (SS)",
            "ELECTRICAL AND ELECTRONICS (SANDWICH) (SS)",
        ],
    ),
    (
        "MECH",
        &[
            "MECHANICAL ENGINEERING",
            "MECHANICAL ENGINEERING (SS)",
            "MECHANICAL ENGINEERING (SANDWICH) (SS)",
            "MECHANICAL ENGINEERING (TAMIL MEDIUM)",
            "MECHANICAL AND AUTOMATION ENGINEERING",
        ],
    ),
    (
        "CIVIL",
        &[
            "CIVIL ENGINEERING",
            "CIVIL ENGINEERING (SS)",
            "CIVIL ENGINEERING (TAMIL MEDIUM)",
            "CIVIL AND STRUCTUTURAL ENGINEERING",
        ],
    ),
    (
        "AI&DS",
        &[
            "ARTIFICIAL INTELLIGENCE AND DATA SCIENCE (SS)",
            "Artificial Intelligence and Data Science",
            "Artificial Intelligence and Machine Learning",
            "COMPUTER SCIENCE AND ENGINEERING (AI AND MACHINE LEARNING)",
            "COMPUTER SCIENCE AND ENGINEERING (DATA SCIENCE)",
        ],
    ),
    (
        "CYBER",
        &[
            "Cyber Security",
            "Computer Science and Engineering (Cyber Security)",
            "Computer Science and Engineering (Internet of Things and Cyber Security including Block Chain Technology)",
        ],
    ),
    (
        "BIOTECH",
        &[
            "BIO TECHNOLOGY",
            "BIO TECHNOLOGY (SS)",
            "INDUSTRIAL BIO TECHNOLOGY",
            "INDUSTRIAL BIO TECHNOLOGY (SS)",
        ],
    ),
    (
        "BME",
        &[
            "BIO MEDICAL ENGINEERING",
            "BIO MEDICAL ENGINEERING (SS)",
            "MEDICAL ELECTRONICS",
        ],
    ),
];

/// Short branch code to the full department names used in the cutoff exports.
#[derive(Debug, Clone)]
pub struct BranchCatalog {
    aliases: HashMap<&'static str, &'static [&'static str]>,
}

impl BranchCatalog {
    pub fn standard() -> Self {
        Self {
            aliases: STANDARD_BRANCHES.iter().copied().collect(),
        }
    }

    /// Expand a selection into department names.
    ///
    /// Returns `None` when the selection does not constrain branches: nothing selected,
    /// the "All Branches" sentinel present, or only blank values.
    pub fn expand<S: AsRef<str>>(&self, selection: &[S]) -> Option<BTreeSet<String>> {
        if selection
            .iter()
            .any(|value| value.as_ref().trim() == ALL_BRANCHES)
        {
            return None;
        }

        let mut names = BTreeSet::new();
        for value in selection {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match self.aliases.get(value) {
                Some(full_names) => names.extend(full_names.iter().map(|name| name.to_string())),
                None => {
                    names.insert(value.to_string());
                }
            }
        }

        if names.is_empty() {
            None
        } else {
            Some(names)
        }
    }
}

impl Default for BranchCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
