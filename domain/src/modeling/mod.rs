//! Modeling-language vocabulary shared by tools, facades and templates.

pub mod value_objects;

pub use value_objects::{
    ApplicationDomain, ComponentType, ExportFormat, PlmSystem, Priority, SafetyLevel,
    SafetyStandard, SyncOperation, UnknownVariant,
};
