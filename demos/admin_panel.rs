//! Admin panel demonstration.
//!
//! This example shows the edits an administrator can make and how they
//! change what other principals see:
//! - Grant a module through the permission builder
//! - Put a module into maintenance and disable another
//! - Print the permission matrix for a module
//!
//! Run with: `cargo run --example admin_panel`

use zuuz_access::{AccessControl, Action, Error, HashCost, ModuleStatus, Secret, ADMIN_PANEL};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    println!("=== ZUUZ Admin Panel Example ===\n");

    let mut control = AccessControl::builder()
        .hash_cost(HashCost::minimal())
        .build()?;

    // Only principals who can open the admin panel may edit.
    control.login("bob.wilson@zuuz.com", &Secret::from("user123"))?;
    match control.set_module_status("ai-agent", ModuleStatus::Disabled) {
        Ok(_) => println!("unexpected: member changed a module status"),
        Err(err) => println!("✗ Bob cannot edit: {err}"),
    }

    let admin = control.login("admin@zuuz.com", &Secret::from("admin123"))?;
    println!("✓ Signed in as {}\n", admin.name);

    println!("--- Permission matrix: productivity-score ---");
    for row in control.directory().coverage("productivity-score") {
        println!("  {:<8} {}/{}", row.role.to_string(), row.granted, row.total);
    }

    let bob = control
        .directory()
        .by_id("user-3")
        .ok_or_else(|| Error::UnknownPrincipal("user-3".to_string()))?;
    let edited = bob
        .permissions
        .edit()
        .grant("productivity-score", Action::Read)
        .build();
    control.update_permissions(&bob.id, edited)?;
    println!("✓ Granted productivity-score to {}", bob.name);

    control.set_module_status("quiet-hours", ModuleStatus::Maintenance)?;
    control.set_module_status("ai-agent", ModuleStatus::Disabled)?;
    if let Err(err) = control.set_module_status(ADMIN_PANEL, ModuleStatus::Disabled) {
        println!("✗ {err}");
    }

    println!("\n--- Module status ---");
    for (module, status) in control.module_status().overrides() {
        println!("  {module:<16} {status}");
    }

    control.login("bob.wilson@zuuz.com", &Secret::from("user123"))?;
    println!("\n--- Bob's sidebar after the edits ---");
    for module in control.visible_modules() {
        println!("  {}", module.name);
    }

    control.logout();
    Ok(())
}
