//! Closed vocabularies of the modeling language
//!
//! Every enumerated tool argument (safety standards, integrity levels, export
//! formats, PLM systems, ...) is a value object here. Each one knows its wire
//! spelling, so the tool catalogue can publish the legal values and the request
//! builder can parse them back without string conventions leaking upward.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string is not part of a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub value: String,
    pub allowed: &'static [&'static str],
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not one of [{}]",
            self.value,
            self.allowed.join(", ")
        )
    }
}

impl std::error::Error for UnknownVariant {}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Wire spellings, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($wire),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    _ => Err(UnknownVariant {
                        value: s.to_string(),
                        allowed: Self::VALUES,
                    }),
                }
            }
        }
    };
}

vocabulary! {
    /// Functional-safety standard a model is checked against
    pub enum SafetyStandard {
        /// Road vehicles (ASIL)
        Iso26262 => "iso26262",
        /// Airborne software (DAL)
        Do178c => "do178c",
        /// Industrial (SIL)
        Iec61508 => "iec61508",
    }
}

vocabulary! {
    /// Safety integrity level attached to a requirement
    pub enum SafetyLevel {
        AsilA => "ASIL_A",
        AsilB => "ASIL_B",
        AsilC => "ASIL_C",
        AsilD => "ASIL_D",
        DalA => "DAL_A",
        DalB => "DAL_B",
        DalC => "DAL_C",
        DalD => "DAL_D",
        Sil1 => "SIL_1",
        Sil2 => "SIL_2",
        Sil3 => "SIL_3",
        Sil4 => "SIL_4",
    }
}

vocabulary! {
    /// Requirement priority
    pub enum Priority {
        Critical => "Critical",
        High => "High",
        Medium => "Medium",
        Low => "Low",
    }
}

vocabulary! {
    /// Architecture layer a generated component belongs to
    pub enum ComponentType {
        Logical => "Logical",
        Physical => "Physical",
        Operational => "Operational",
    }
}

vocabulary! {
    /// Application domain used to steer architecture suggestions
    pub enum ApplicationDomain {
        Automotive => "automotive",
        Aerospace => "aerospace",
        Defense => "defense",
        Industrial => "industrial",
    }
}

vocabulary! {
    /// Output format for `export`
    pub enum ExportFormat {
        Capella => "capella",
        Json => "json",
        Yaml => "yaml",
        Xml => "xml",
        Markdown => "markdown",
        Html => "html",
        Pdf => "pdf",
    }
}

vocabulary! {
    /// External PLM / requirements-management system
    pub enum PlmSystem {
        Windchill => "windchill",
        Teamcenter => "teamcenter",
        ThreeDExperience => "3dexperience",
        Polarion => "polarion",
        Jama => "jama",
        Doors => "doors",
        Jira => "jira",
    }
}

vocabulary! {
    /// Direction of a PLM synchronization
    pub enum SyncOperation {
        Pull => "pull",
        Push => "push",
    }
}

impl ExportFormat {
    /// File extension used when no explicit output path is given.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Capella => "capella",
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Xml => "xml",
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        Self::Html
    }
}

impl Default for SafetyStandard {
    fn default() -> Self {
        Self::Iso26262
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::High
    }
}

impl Default for ComponentType {
    fn default() -> Self {
        Self::Logical
    }
}

impl Default for ApplicationDomain {
    fn default() -> Self {
        Self::Automotive
    }
}

impl Default for SyncOperation {
    fn default() -> Self {
        Self::Pull
    }
}

impl ComponentType {
    /// Keyword of the enclosing `architecture <layer> { }` block.
    pub fn layer_keyword(&self) -> &'static str {
        match self {
            ComponentType::Logical => "logical",
            ComponentType::Physical => "physical",
            ComponentType::Operational => "operational",
        }
    }
}
