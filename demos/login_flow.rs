//! Sign-in and navigation demonstration.
//!
//! This example walks the dashboard's sign-in flow for a few demo accounts:
//! 1. Validate credentials and start a session
//! 2. Build the sidebar from the visible modules
//! 3. Guard a route and report the outcome
//! 4. Sign out
//!
//! Run with: `cargo run --example login_flow`

use zuuz_access::{AccessControl, Action, HashCost, ModuleAccess, Permission, Secret};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    println!("=== ZUUZ Sign-in Example ===\n");

    let control = match AccessControl::builder()
        .hash_cost(HashCost::minimal())
        .build()
    {
        Ok(control) => control,
        Err(err) => {
            eprintln!("failed to assemble access control: {err}");
            std::process::exit(1);
        }
    };

    for (identifier, secret) in [
        ("john.doe@zuuz.com", "user123"),
        ("manager.engineering@zuuz.com", "mgr123"),
        ("admin@zuuz.com", "admin123"),
        ("demo", "demo"),
        ("john.doe@zuuz.com", "wrong-password"),
    ] {
        println!("--- {identifier} ---");

        let principal = match control.login(identifier, &Secret::from(secret)) {
            Ok(principal) => principal,
            Err(err) => {
                println!("✗ {err}\n");
                continue;
            }
        };
        println!("✓ Signed in as {} ({})", principal.name, principal.role);

        println!("  Sidebar:");
        for module in control.visible_modules() {
            println!("    {:<24} {}", module.name, module.route);
        }

        let evaluator = control.evaluator();
        let route = control
            .guard()
            .require(ModuleAccess::to("file-access"))
            .require(Permission::on("file-access", Action::Read))
            .check(&evaluator);
        match route {
            Ok(_) => println!("  /file-access: allowed"),
            Err(violation) => println!("  /file-access: {violation}"),
        }

        println!(
            "  dashboard write: {}",
            control.has_permission("dashboard", Action::Write)
        );

        control.logout();
        println!();
    }

    println!("Signed in after logout: {}", control.session().is_authenticated());
}
