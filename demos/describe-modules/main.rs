//! Describes and verifies a small bundled fixture application.
//!
//! This demonstrates the core end to end without depending on any particular byte-code importer:
//! the fixture below builds `JavaClass` values directly, the way a real host application's
//! importer would after reading them off disk.

use std::collections::HashMap;

use clap::Parser;
use modulith::{
    class::{ConstructorDescriptor, JavaClass, MarkerAttributes, Visibility},
    config::ApplicationModulesOptions,
    container::ApplicationModules,
    name::PackageName,
    Classes,
};
use thiserror::Error;

/// Prints a module-by-module description of the bundled fixture, and verifies its architecture.
#[derive(Parser)]
#[command(name = "describe-modules")]
#[command(about = "Describes and verifies a bundled fixture application", long_about = None)]
struct Args {
    /// Only verify; suppress the per-module description output.
    #[arg(short = 'q', long = "quiet", help = "Skip printing module descriptions")]
    quiet: bool,
}

/// Failures this demo can raise, distinct from a reported architecture violation (which is
/// printed but does not abort the process).
#[derive(Debug, Error)]
enum DescribeError {
    /// The fixture's declared architecture could not be resolved.
    #[error("failed to resolve application modules: {0}")]
    Configuration(#[from] modulith::ConfigurationError),
}

fn main() -> Result<(), DescribeError> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let classes = Classes::new(fixture_classes());
    let options = ApplicationModulesOptions::default().application_module_marker("demo.ApplicationModule");

    let modules = ApplicationModules::of(vec![PackageName::new("demo")], classes, options)?;

    if !args.quiet {
        for module in modules.iter() {
            println!("{}", modulith::container::ModuleDescription::new(module, &modules));
        }
    }

    match modules.verify() {
        Ok(()) => println!("No violations found."),
        Err(failure) => println!("Violations found:\n{}", failure.violations),
    }

    Ok(())
}

/// A small two-module fixture: `order` depends on `inventory` through an undeclared dependency,
/// to demonstrate a violation being reported.
fn fixture_classes() -> Vec<JavaClass> {
    let mut order_service = plain_class("demo.order.OrderService");
    order_service.annotations.insert("org.springframework.stereotype.Service".to_owned());
    order_service.constructors.push(ConstructorDescriptor {
        parameter_types: vec!["demo.inventory.InventoryClient".to_owned()],
        annotations: Default::default(),
    });

    let mut order_package_info = plain_class("demo.order.package-info");
    order_package_info.markers.insert(
        "demo.ApplicationModule".to_owned(),
        MarkerAttributes {
            display_name: Some("Order Management".to_owned()),
            ..Default::default()
        },
    );

    let mut inventory_client = plain_class("demo.inventory.InventoryClient");
    inventory_client.annotations.insert("org.springframework.stereotype.Service".to_owned());

    vec![order_service, order_package_info, inventory_client]
}

fn plain_class(fqn: &str) -> JavaClass {
    let package = fqn
        .rsplit_once('.')
        .map_or_else(|| PackageName::new(fqn), |(package, _)| PackageName::new(package));
    JavaClass {
        fully_qualified_name: fqn.to_owned(),
        package,
        visibility: Visibility::Public,
        annotations: Default::default(),
        markers: HashMap::new(),
        super_class: None,
        interfaces: Vec::new(),
        fields: Vec::new(),
        constructors: Vec::new(),
        methods: Vec::new(),
        references: Vec::new(),
    }
}
