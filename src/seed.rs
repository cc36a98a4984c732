//! Built-in ZUUZ dashboard data.
//!
//! The module catalog follows the sidebar navigation, including its role
//! restrictions. Principals, teams and credential pairs are the demo
//! organization the dashboard ships with.

use crate::config::{CredentialConfig, DirectoryConfig};
use crate::module::{ModuleDescriptor, ADMIN_PANEL};
use crate::permission::{Action, ActionSet, Grant, PermissionSet};
use crate::principal::{Principal, Team};
use crate::role::Role::{
    self, Administrator as Admin, OwnerExecutive as Ceo, StandardMember as Member,
    TeamLead as Manager,
};
use crate::validator::LegacyFallback;

use Action::{Administer, Read, Write};

/// The complete built-in configuration, with the default hash cost.
pub fn zuuz() -> DirectoryConfig {
    DirectoryConfig {
        modules: modules(),
        principals: principals(),
        teams: teams(),
        credentials: credentials(),
        legacy: LegacyFallback {
            identifiers: vec!["demo@zuuz.com".to_string(), "demo".to_string()],
            fallback_principal: Some("ceo-1".to_string()),
        },
        ..DirectoryConfig::default()
    }
}

/// The navigation catalog.
pub fn modules() -> Vec<ModuleDescriptor> {
    let all = [Ceo, Manager, Member];
    vec![
        ModuleDescriptor::new("dashboard", "Dashboard", "/dashboard")
            .described("Main analytics dashboard")
            .with_icon("BarChart3"),
        ModuleDescriptor::new("ai-agent", "AI Agent", "/ai-agent")
            .described("AI-powered assistant")
            .with_icon("Bot"),
        ModuleDescriptor::new("email-analytics", "Email Analytics", "/email-analytics")
            .described("Email performance metrics")
            .with_icon("Mail")
            .restricted_to(all),
        ModuleDescriptor::new(
            "document-collaboration",
            "Document Collaboration",
            "/document-collaboration",
        )
        .described("Document sharing and collaboration")
        .with_icon("FileText")
        .restricted_to(all),
        ModuleDescriptor::new("teams-activity", "Teams Activity", "/teams-activity")
            .described("Microsoft Teams collaboration data")
            .with_icon("Activity")
            .restricted_to(all),
        ModuleDescriptor::new(
            "sharepoint-documents",
            "SharePoint Documents",
            "/sharepoint-documents",
        )
        .described("SharePoint document statistics")
        .with_icon("FileText")
        .restricted_to(all),
        ModuleDescriptor::new("file-access", "File Access", "/file-access")
            .described("File access and security monitoring")
            .with_icon("Database")
            .restricted_to([Ceo, Admin]),
        ModuleDescriptor::new("top-collaborators", "Top Collaborators", "/top-collaborators")
            .with_icon("Users")
            .restricted_to([Ceo, Manager]),
        ModuleDescriptor::new("quiet-hours", "Quiet Hours", "/quiet-hours")
            .with_icon("Clock")
            .restricted_to([Ceo, Manager]),
        ModuleDescriptor::new("productivity-score", "Productivity Score", "/productivity-score")
            .described("Employee productivity metrics")
            .with_icon("TrendingUp")
            .restricted_to(all),
        ModuleDescriptor::new("sentiment-analysis", "Sentiment Analysis", "/sentiment-analysis")
            .described("Team sentiment and mood tracking")
            .with_icon("Heart")
            .restricted_to([Ceo, Manager]),
        ModuleDescriptor::new("saas-integrations", "SAAS Integrations", "/saas-integrations")
            .with_icon("Cloud")
            .restricted_to([Ceo, Admin]),
        ModuleDescriptor::new("erp-integrations", "ERP Integrations", "/erp-integrations")
            .with_icon("Settings")
            .restricted_to([Ceo, Admin]),
        ModuleDescriptor::new(ADMIN_PANEL, "Admin Panel", "/admin")
            .described("System administration")
            .with_icon("Shield")
            .restricted_to([Admin]),
    ]
}

fn grants(modules: &[&str], actions: &[Action]) -> Vec<Grant> {
    modules
        .iter()
        .map(|m| Grant::new(*m, actions.iter().copied().collect::<ActionSet>()))
        .collect()
}

const MEMBER_MODULES: [&str; 9] = [
    "dashboard",
    "ai-agent",
    "email-analytics",
    "document-collaboration",
    "teams-activity",
    "sharepoint-documents",
    "top-collaborators",
    "quiet-hours",
    "productivity-score",
];

fn principal(
    id: &str,
    login: &str,
    name: &str,
    role: Role,
    department: &str,
    team: Option<&str>,
    permissions: Vec<Grant>,
) -> Principal {
    Principal {
        id: id.to_string(),
        login: login.to_string(),
        name: name.to_string(),
        role,
        department: department.to_string(),
        team: team.map(str::to_string),
        permissions: PermissionSet::new(permissions),
    }
}

/// The demo organization.
pub fn principals() -> Vec<Principal> {
    let ceo_modules = [
        "dashboard",
        "ai-agent",
        "email-analytics",
        "document-collaboration",
        "teams-activity",
        "sharepoint-documents",
        "file-access",
        "top-collaborators",
        "quiet-hours",
        "productivity-score",
        "sentiment-analysis",
        "saas-integrations",
        "erp-integrations",
    ];

    let admin = [
        grants(&[ADMIN_PANEL], &[Read, Write, Administer]),
        grants(&["dashboard", "ai-agent"], &[Read, Write]),
        grants(
            &[
                "file-access",
                "saas-integrations",
                "erp-integrations",
                "user-management",
                "security-monitoring",
            ],
            &[Read, Write, Administer],
        ),
    ]
    .concat();

    let manager = || {
        let mut g = grants(&MEMBER_MODULES, &[Read]);
        g.extend(grants(&["sentiment-analysis"], &[Read]));
        g.extend(grants(&["team-management"], &[Read, Write]));
        g
    };

    vec![
        principal(
            "ceo-1",
            "ceo@zuuz.com",
            "John CEO",
            Ceo,
            "Executive",
            None,
            grants(&ceo_modules, &[Read, Write, Administer]),
        ),
        principal("admin-1", "admin@zuuz.com", "System Admin", Admin, "IT", None, admin),
        principal(
            "mgr-1",
            "manager.engineering@zuuz.com",
            "Mike Manager",
            Manager,
            "Engineering",
            Some("team-eng"),
            manager(),
        ),
        principal(
            "mgr-2",
            "manager.marketing@zuuz.com",
            "Sarah Manager",
            Manager,
            "Marketing",
            Some("team-mkt"),
            manager(),
        ),
        principal(
            "user-1",
            "john.doe@zuuz.com",
            "John Doe",
            Member,
            "Engineering",
            Some("team-eng"),
            grants(&MEMBER_MODULES, &[Read]),
        ),
        principal(
            "user-2",
            "jane.smith@zuuz.com",
            "Jane Smith",
            Member,
            "Marketing",
            Some("team-mkt"),
            [
                grants(&MEMBER_MODULES, &[Read]),
                grants(&["sentiment-analysis"], &[Read]),
            ]
            .concat(),
        ),
        principal(
            "user-3",
            "bob.wilson@zuuz.com",
            "Bob Wilson",
            Member,
            "Sales",
            Some("team-sales"),
            grants(&["dashboard", "ai-agent", "email-analytics"], &[Read]),
        ),
    ]
}

/// The organization chart.
pub fn teams() -> Vec<Team> {
    let team = |id: &str, name: &str, department: &str, manager: &str, members: &[&str]| Team {
        id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        manager: manager.to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
    };

    vec![
        team(
            "team-eng",
            "Engineering Team",
            "Engineering",
            "mgr-1",
            &["user-1", "user-4", "user-5"],
        ),
        team("team-mkt", "Marketing Team", "Marketing", "mgr-2", &["user-2", "user-6"]),
        team("team-sales", "Sales Team", "Sales", "mgr-3", &["user-3", "user-7"]),
    ]
}

/// The accepted credential pairs, including the legacy demo ones.
pub fn credentials() -> Vec<CredentialConfig> {
    [
        ("ceo@zuuz.com", "ceo123"),
        ("admin@zuuz.com", "admin123"),
        ("manager.engineering@zuuz.com", "mgr123"),
        ("manager.marketing@zuuz.com", "mgr123"),
        ("john.doe@zuuz.com", "user123"),
        ("jane.smith@zuuz.com", "user123"),
        ("bob.wilson@zuuz.com", "user123"),
        ("demo@zuuz.com", "password"),
        ("demo", "demo"),
        ("admin@zuuz.com", "password"),
    ]
    .into_iter()
    .map(|(identifier, secret)| CredentialConfig::plain(identifier, secret))
    .collect()
}
