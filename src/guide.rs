//! Flood preparedness and response guidance shown to residents.

pub struct GuideSection {
    pub title: &'static str,
    pub steps: &'static [&'static str],
}

pub static PREPAREDNESS_GUIDE: &[GuideSection] = &[
    GuideSection {
        title: "Before Floods",
        steps: &[
            "Prepare emergency kits and documents.",
            "Know your nearest evacuation center.",
            "Monitor AquaAlert for flood warnings.",
        ],
    },
    GuideSection {
        title: "During Floods",
        steps: &[
            "Move to higher ground.",
            "Avoid floodwaters.",
            "Follow LGU instructions.",
        ],
    },
    GuideSection {
        title: "After Floods",
        steps: &[
            "Report damages.",
            "Avoid contaminated water.",
            "Seek medical help if needed.",
        ],
    },
];

/// Render the guide as plain text, one bullet per step.
pub fn render() -> String {
    let mut out = String::new();
    for section in PREPAREDNESS_GUIDE {
        out.push_str(section.title);
        out.push('\n');
        for step in section.steps {
            out.push_str("  - ");
            out.push_str(step);
            out.push('\n');
        }
    }
    out
}
