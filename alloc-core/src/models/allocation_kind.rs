use std::fmt;

use serde::{Deserialize, Serialize};

/// The six savings vehicles a salary can be split across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AllocationKind {
    #[serde(rename = "traditional401k")]
    Traditional401k,
    #[serde(rename = "roth401k")]
    Roth401k,
    #[serde(rename = "hsa")]
    Hsa,
    #[serde(rename = "rothIRA")]
    RothIra,
    #[serde(rename = "emergencyFund")]
    EmergencyFund,
    #[serde(rename = "taxableBrokerage")]
    TaxableBrokerage,
}

impl AllocationKind {
    pub const ALL: [AllocationKind; 6] = [
        Self::Traditional401k,
        Self::Roth401k,
        Self::Hsa,
        Self::RothIra,
        Self::EmergencyFund,
        Self::TaxableBrokerage,
    ];

    /// Storage key used in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traditional401k => "traditional401k",
            Self::Roth401k => "roth401k",
            Self::Hsa => "hsa",
            Self::RothIra => "rothIRA",
            Self::EmergencyFund => "emergencyFund",
            Self::TaxableBrokerage => "taxableBrokerage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Traditional401k => "Traditional 401(k)",
            Self::Roth401k => "Roth 401(k)",
            Self::Hsa => "HSA",
            Self::RothIra => "Roth IRA",
            Self::EmergencyFund => "Emergency Fund",
            Self::TaxableBrokerage => "Taxable Brokerage",
        }
    }

    /// Pre-tax kinds reduce taxable income; the rest come out of after-tax pay.
    pub fn is_pre_tax(&self) -> bool {
        matches!(self, Self::Traditional401k | Self::Hsa)
    }

    /// Accepts the storage key in any case, or the kebab-case spelling
    /// (`traditional-401k`, `roth-ira`, `emergency-fund`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match folded.as_str() {
            "traditional401k" => Some(Self::Traditional401k),
            "roth401k" => Some(Self::Roth401k),
            "hsa" => Some(Self::Hsa),
            "rothira" => Some(Self::RothIra),
            "emergencyfund" => Some(Self::EmergencyFund),
            "taxablebrokerage" => Some(Self::TaxableBrokerage),
            _ => None,
        }
    }
}

impl fmt::Display for AllocationKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_every_storage_key() {
        for kind in AllocationKind::ALL {
            assert_eq!(AllocationKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn parse_accepts_kebab_case_and_mixed_case() {
        assert_eq!(
            AllocationKind::parse("traditional-401k"),
            Some(AllocationKind::Traditional401k)
        );
        assert_eq!(AllocationKind::parse("Roth-IRA"), Some(AllocationKind::RothIra));
        assert_eq!(
            AllocationKind::parse("taxable_brokerage"),
            Some(AllocationKind::TaxableBrokerage)
        );
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        assert_eq!(AllocationKind::parse("crypto"), None);
        assert_eq!(AllocationKind::parse(""), None);
    }

    #[test]
    fn only_traditional_401k_and_hsa_are_pre_tax() {
        let pre_tax: Vec<_> = AllocationKind::ALL
            .into_iter()
            .filter(AllocationKind::is_pre_tax)
            .collect();

        assert_eq!(pre_tax, vec![AllocationKind::Traditional401k, AllocationKind::Hsa]);
    }

    #[test]
    fn serde_uses_storage_keys() {
        let json = serde_json::to_string(&AllocationKind::RothIra).unwrap();

        assert_eq!(json, "\"rothIRA\"");
    }
}
