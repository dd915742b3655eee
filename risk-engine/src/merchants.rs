//! Static merchant directory
//!
//! Built once at startup, either from the bundled table or from a TOML file,
//! and shared read-only afterwards. Lookups never fail: unknown identifiers
//! resolve to [`MerchantRecord::unknown`].
//!
//! File format:
//!
//! ```toml
//! [merchants.MCC_5411_12345]
//! name = "Whole Foods Market"
//! category = "Grocery Store"
//! location = "123 Main St, New York, NY"
//! risk_level = "Low"
//! mcc_code = "5411"
//! ```

use crate::{Error, MerchantRecord, Result, RiskLevel};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    merchants: BTreeMap<String, MerchantRecord>,
}

/// Read-only mapping from merchant identifier to metadata
#[derive(Debug, Clone)]
pub struct MerchantDirectory {
    merchants: BTreeMap<String, MerchantRecord>,
    fallback: MerchantRecord,
}

impl MerchantDirectory {
    /// Build a directory from records, validating identifiers and MCC codes
    pub fn new(merchants: BTreeMap<String, MerchantRecord>) -> Result<Self> {
        for (id, record) in &merchants {
            if id.trim().is_empty() {
                return Err(Error::InvalidDirectory("empty merchant identifier".to_string()));
            }
            if !is_mcc_code(&record.mcc_code) {
                return Err(Error::InvalidDirectory(format!(
                    "merchant {} has invalid MCC code {:?}",
                    id, record.mcc_code
                )));
            }
        }

        Ok(Self {
            merchants,
            fallback: MerchantRecord::unknown(),
        })
    }

    /// Directory bundled with the service
    pub fn builtin() -> Self {
        let merchants = [
            (
                "MCC_5411_12345",
                "Whole Foods Market",
                "Grocery Store",
                "123 Main St, New York, NY",
                RiskLevel::Low,
                "5411",
            ),
            (
                "MCC_5812_67890",
                "McDonald's",
                "Fast Food Restaurant",
                "456 Oak Ave, Los Angeles, CA",
                RiskLevel::Medium,
                "5812",
            ),
            (
                "MCC_5999_11111",
                "Suspicious Store",
                "Unknown Business",
                "999 Dark Alley, High Risk City",
                RiskLevel::High,
                "5999",
            ),
            (
                "MCC_4121_22222",
                "Uber",
                "Transportation Service",
                "San Francisco, CA",
                RiskLevel::Low,
                "4121",
            ),
        ]
        .into_iter()
        .map(|(id, name, category, location, risk_level, mcc_code)| {
            (
                id.to_string(),
                MerchantRecord {
                    name: name.to_string(),
                    category: category.to_string(),
                    location: location.to_string(),
                    risk_level,
                    mcc_code: mcc_code.to_string(),
                },
            )
        })
        .collect();

        Self {
            merchants,
            fallback: MerchantRecord::unknown(),
        }
    }

    /// Parse a directory from TOML
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: DirectoryFile =
            toml::from_str(contents).map_err(|e| Error::InvalidDirectory(e.to_string()))?;
        Self::new(file.merchants)
    }

    /// Load a directory from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let directory = Self::from_toml_str(&contents)?;
        info!(
            "Loaded {} merchants from {}",
            directory.len(),
            path.display()
        );
        Ok(directory)
    }

    /// Look up a merchant, falling back to the unknown-merchant record
    pub fn lookup(&self, merchant_id: &str) -> &MerchantRecord {
        self.merchants.get(merchant_id).unwrap_or(&self.fallback)
    }

    /// Known merchant identifiers
    pub fn merchant_ids(&self) -> Vec<&str> {
        self.merchants.keys().map(String::as_str).collect()
    }

    /// Number of known merchants
    pub fn len(&self) -> usize {
        self.merchants.len()
    }

    /// Whether the directory has no merchants
    pub fn is_empty(&self) -> bool {
        self.merchants.is_empty()
    }
}

impl Default for MerchantDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

fn is_mcc_code(code: &str) -> bool {
    code.len() == 4 && code.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let directory = MerchantDirectory::builtin();
        let merchant = directory.lookup("MCC_5999_11111");
        assert_eq!(merchant.name, "Suspicious Store");
        assert_eq!(merchant.risk_level, RiskLevel::High);
        assert_eq!(merchant.mcc_code, "5999");
    }

    #[test]
    fn test_unknown_lookup_falls_back() {
        let directory = MerchantDirectory::builtin();
        for id in ["", "nonexistent_key", "mcc_5999_11111"] {
            let merchant = directory.lookup(id);
            assert_eq!(merchant, &MerchantRecord::unknown());
            assert_eq!(merchant.risk_level, RiskLevel::Medium);
        }
    }

    #[test]
    fn test_merchant_ids() {
        let directory = MerchantDirectory::builtin();
        assert_eq!(
            directory.merchant_ids(),
            vec!["MCC_4121_22222", "MCC_5411_12345", "MCC_5812_67890", "MCC_5999_11111"]
        );
    }

    #[test]
    fn test_from_toml() {
        let directory = MerchantDirectory::from_toml_str(
            r#"
            [merchants.MCC_7995_00001]
            name = "Lucky Casino"
            category = "Gambling"
            location = "Las Vegas, NV"
            risk_level = "High"
            mcc_code = "7995"
            "#,
        )
        .unwrap();

        assert_eq!(directory.len(), 1);
        assert_eq!(directory.lookup("MCC_7995_00001").name, "Lucky Casino");
        assert_eq!(directory.lookup("MCC_5411_12345").name, "Unknown Merchant");
    }

    #[test]
    fn test_empty_toml_gives_empty_directory() {
        let directory = MerchantDirectory::from_toml_str("").unwrap();
        assert!(directory.is_empty());
        assert_eq!(directory.lookup("anything").mcc_code, "0000");
    }

    #[test]
    fn test_rejects_bad_mcc_code() {
        let result = MerchantDirectory::from_toml_str(
            r#"
            [merchants.BAD]
            name = "Bad"
            category = "Bad"
            location = "Nowhere"
            risk_level = "Low"
            mcc_code = "59A9"
            "#,
        );
        assert!(matches!(result, Err(Error::InvalidDirectory(_))));
    }

    #[test]
    fn test_rejects_unknown_risk_level() {
        let result = MerchantDirectory::from_toml_str(
            r#"
            [merchants.X]
            name = "X"
            category = "X"
            location = "X"
            risk_level = "Extreme"
            mcc_code = "1234"
            "#,
        );
        assert!(matches!(result, Err(Error::InvalidDirectory(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = MerchantDirectory::from_file("/nonexistent/merchants.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
