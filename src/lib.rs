#![warn(
    clippy::pedantic,
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rust_2021_compatibility
)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

//! Welcome to `modulith`, a library that verifies a Java application's packages respect a
//! declared modular architecture, independent of any particular byte-code toolchain.
//!
//! The core never parses byte code or reads annotations itself: the host application imports its
//! classes however it likes (`javap`, ASM, a running JVM's reflection API, ...) and hands over a
//! [`Classes`] universe, implementing the small [`external::PackageAnnotationSource`] trait for
//! anything the core needs to read off a package descriptor. From there, [`ApplicationModules::of`]
//! discovers modules, resolves their named interfaces and declared dependencies, and
//! [`ApplicationModules::verify`] reports every violation found.
//! ## Features
#![doc = document_features::document_features!()]

pub mod class;
pub mod classes;
pub mod config;
pub mod container;
pub mod dependency;
pub mod error;
pub mod evident_type;
pub mod external;
pub mod interface;
pub mod module;
pub mod name;
pub mod package;
pub mod policy;
pub mod stereotype;
pub mod violation;

pub use class::{Annotations, JavaClass, MarkerAttributes, Visibility};
pub use classes::Classes;
pub use config::{ApplicationModulesOptions, ConfigurationSource, MapConfigurationSource};
pub use container::{ApplicationModules, ModuleOrderComparator};
pub use error::{ConfigurationError, VerificationFailed};
pub use evident_type::ArchitecturallyEvidentType;
pub use module::{ApplicationModule, ApplicationModuleIdentifier};
pub use name::PackageName;
pub use stereotype::StereotypeCatalog;
pub use violation::{Violation, Violations};
