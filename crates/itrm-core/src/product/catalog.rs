//! Hardcoded product comparison data.

use serde::Deserialize;

pub const NOT_FOUND_REPLY: &str = "Sorry, I don't have comparison data for that product yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub cost: Tier,
    pub performance: Tier,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComparisonEntry {
    pub product: String,
    pub category: String,
    pub alternatives: Vec<Alternative>,
}

impl ComparisonEntry {
    /// Multi-line listing of the product's category and alternatives.
    pub fn render(&self) -> String {
        let mut out = format!("{} (Category: {})\nAlternatives:", self.product, self.category);
        for alt in &self.alternatives {
            out.push_str(&format!(
                "\n- {}: cost {}, performance {}. {}",
                alt.name, alt.cost, alt.performance, alt.notes
            ));
        }
        out
    }
}

fn alt(name: &str, cost: Tier, performance: Tier, notes: &str) -> Alternative {
    Alternative {
        name: name.into(),
        cost,
        performance,
        notes: notes.into(),
    }
}

fn entry(product: &str, category: &str, alternatives: Vec<Alternative>) -> ComparisonEntry {
    ComparisonEntry {
        product: product.into(),
        category: category.into(),
        alternatives,
    }
}

/// Ordered list of known products. Lookup returns the first product whose
/// name appears in the utterance.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    entries: Vec<ComparisonEntry>,
}

impl ProductCatalog {
    pub fn new(entries: Vec<ComparisonEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn find(&self, utterance: &str) -> Option<&ComparisonEntry> {
        let lower = utterance.to_lowercase();
        self.entries
            .iter()
            .find(|e| lower.contains(&e.product.to_lowercase()))
    }

    pub fn describe(&self, utterance: &str) -> String {
        self.find(utterance)
            .map(ComparisonEntry::render)
            .unwrap_or_else(|| NOT_FOUND_REPLY.to_string())
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        use Tier::*;
        Self::new(vec![
            entry(
                "NetApp",
                "Storage",
                vec![
                    alt("Dell EMC PowerStore", Medium, High, "Strong VMware integration, simpler licensing."),
                    alt("Pure Storage FlashArray", High, High, "Evergreen subscription avoids forklift upgrades."),
                    alt("HPE Nimble", Medium, Medium, "Predictive analytics via InfoSight."),
                ],
            ),
            entry(
                "Dell EMC",
                "Storage",
                vec![
                    alt("NetApp AFF", High, High, "Mature snapshot and replication tooling."),
                    alt("HPE Alletra", Medium, High, "Cloud-managed operations."),
                ],
            ),
            entry(
                "Cisco",
                "Telecom",
                vec![
                    alt("Juniper Mist", Medium, High, "AI-driven wireless operations."),
                    alt("Aruba", Medium, Medium, "Lower entry cost for campus networks."),
                ],
            ),
            entry(
                "VMware",
                "Software",
                vec![
                    alt("Nutanix AHV", Medium, High, "Hypervisor included with the platform."),
                    alt("Microsoft Hyper-V", Low, Medium, "Bundled with Windows Server Datacenter."),
                    alt("Proxmox VE", Low, Medium, "Open source, paid support optional."),
                ],
            ),
            entry(
                "CrowdStrike",
                "Cybersecurity",
                vec![
                    alt("SentinelOne", Medium, High, "Autonomous rollback for ransomware."),
                    alt("Microsoft Defender for Endpoint", Low, Medium, "Included in Microsoft 365 E5."),
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_case_insensitive() {
        let catalog = ProductCatalog::default();
        assert_eq!(catalog.find("options besides vmware?").unwrap().product, "VMware");
    }

    #[test]
    fn test_first_listed_product_wins() {
        let catalog = ProductCatalog::default();
        // Both named; NetApp is listed before Dell EMC.
        assert_eq!(catalog.find("dell emc or netapp").unwrap().product, "NetApp");
    }

    #[test]
    fn test_describe_lists_alternatives() {
        let reply = ProductCatalog::default().describe("replace Cisco");
        assert!(reply.starts_with("Cisco (Category: Telecom)\nAlternatives:"));
        assert!(reply.contains("- Juniper Mist: cost Medium, performance High. AI-driven wireless operations."));
        assert!(reply.contains("- Aruba: cost Medium, performance Medium."));
    }

    #[test]
    fn test_not_found() {
        assert_eq!(ProductCatalog::default().describe("compare toasters"), NOT_FOUND_REPLY);
    }

    #[test]
    fn test_deserialize_custom_entry() {
        let json = r#"{"product": "Okta", "category": "Cybersecurity",
            "alternatives": [{"name": "Entra ID", "cost": "low", "performance": "medium", "notes": "Bundled."}]}"#;
        let e: ComparisonEntry = serde_json::from_str(json).unwrap();
        assert_eq!(e.alternatives[0].cost, Tier::Low);
    }
}
