//! Presentation-side augmentation of replies.
//!
//! The classifier never looks at agent output. Here, after a reply is
//! produced, agent answers that mention both NetApp and Dell get a fixed
//! side-by-side table and a follow-up hint.

use crate::handlers::{Reply, ReplySource};

pub const FOLLOW_UP_HINT: &str =
    "Want more detail? Ask a follow-up question about pricing, support, or migration.";

const COMPARISON_ROWS: &[(&str, &str, &str)] = &[
    ("Feature", "NetApp", "Dell EMC"),
    ("Operating system", "ONTAP", "PowerStoreOS"),
    ("Cloud integration", "Native on AWS, Azure, GCP", "APEX hybrid cloud"),
    ("Data reduction", "Guaranteed 4:1", "Guaranteed 4:1"),
    ("Protocols", "NFS, SMB, iSCSI, FC, S3", "NFS, SMB, iSCSI, FC, NVMe/TCP"),
    ("Relative cost", "Higher", "Moderate"),
    ("Best fit", "Multi-cloud file workloads", "VMware-centric block workloads"),
];

/// A reply ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub side_panel: Option<String>,
}

/// True when every needle occurs in `text` (case-sensitive).
pub fn contains_all(text: &str, needles: &[&str]) -> bool {
    needles.iter().all(|n| text.contains(n))
}

/// Fixed-width NetApp vs Dell EMC table.
pub fn comparison_table() -> String {
    let widths = COMPARISON_ROWS.iter().fold([0usize; 3], |w, (a, b, c)| {
        [w[0].max(a.len()), w[1].max(b.len()), w[2].max(c.len())]
    });

    let mut lines = Vec::with_capacity(COMPARISON_ROWS.len() + 1);
    for (i, (a, b, c)) in COMPARISON_ROWS.iter().enumerate() {
        lines.push(format!(
            "| {:<w0$} | {:<w1$} | {:<w2$} |",
            a,
            b,
            c,
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2]
        ));
        if i == 0 {
            lines.push(format!(
                "|-{}-|-{}-|-{}-|",
                "-".repeat(widths[0]),
                "-".repeat(widths[1]),
                "-".repeat(widths[2])
            ));
        }
    }
    lines.join("\n")
}

pub fn render(reply: &Reply) -> Rendered {
    if reply.source == ReplySource::Agent && contains_all(&reply.text, &["Dell", "NetApp"]) {
        return Rendered {
            text: format!("{}\n\n{}", reply.text, FOLLOW_UP_HINT),
            side_panel: Some(comparison_table()),
        };
    }

    Rendered {
        text: reply.text.clone(),
        side_panel: None,
    }
}
