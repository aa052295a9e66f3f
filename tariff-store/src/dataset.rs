use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tariff_catalog::ModifierRecord;
use tariff_shared::{Member, Venue};
use uuid::Uuid;

/// Everything the store serves, in its on-disk JSON shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub pricing_options: Vec<PricingOptionRecord>,
    /// Kept undecoded until a product using them is looked up
    #[serde(default)]
    pub pricing_modifiers: Vec<ModifierRecord>,
    #[serde(default)]
    pub attachments: Vec<ModifierAttachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub pricing_option_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingOptionRecord {
    pub id: Uuid,
    pub price: Decimal,
}

/// Link between a pricing option and a modifier, with its validity window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierAttachment {
    pub pricing_option_id: Uuid,
    pub pricing_modifier_id: Uuid,
    pub valid_from: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_to: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ModifierAttachment {
    /// Active, already started, and not yet ended (`valid_to` is exclusive)
    pub fn is_current_at(&self, at: DateTime<Utc>) -> bool {
        self.active && self.valid_from <= at && self.valid_to.map_or(true, |end| at < end)
    }
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset: Dataset = serde_json::from_str(&raw).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(
            path = %path.display(),
            venues = dataset.venues.len(),
            members = dataset.members.len(),
            products = dataset.products.len(),
            modifiers = dataset.pricing_modifiers.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DatasetError> {
        let path = path.as_ref();
        let io_err = |source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Cannot access dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
