//! Dashboard sections behind the route guards.
//!
//! SYSTEM CONTEXT
//! ==============
//! The SMTP, template, API-key, OTP and log screens are CRUD forms over the
//! backend and live outside the session core. Each section here renders a
//! placeholder that names its backing endpoint; the home section shows the
//! resolved identity and lets the user re-sync it after a role change.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::session_provider::SessionContext;
use crate::net::api;
use crate::net::config::ApiConfig;
use crate::net::types::Role;

/// A routed dashboard destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Home,
    Smtp,
    Templates,
    ApiKeys,
    TestOtp,
    Logs,
    AdminUsers,
    AdminLogs,
}

impl Section {
    /// Sections every signed-in user sees, in sidebar order.
    pub const USER: [Self; 6] = [Self::Home, Self::Smtp, Self::Templates, Self::ApiKeys, Self::TestOtp, Self::Logs];
    /// Sections only admins see.
    pub const ADMIN: [Self; 2] = [Self::AdminUsers, Self::AdminLogs];

    pub fn route(self) -> &'static str {
        match self {
            Self::Home => "/dashboard",
            Self::Smtp => "/dashboard/smtp",
            Self::Templates => "/dashboard/templates",
            Self::ApiKeys => "/dashboard/apikeys",
            Self::TestOtp => "/dashboard/test-otp",
            Self::Logs => "/dashboard/logs",
            Self::AdminUsers => "/dashboard/admin/users",
            Self::AdminLogs => "/dashboard/admin/logs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Dashboard",
            Self::Smtp => "SMTP Config",
            Self::Templates => "Templates",
            Self::ApiKeys => "API Keys",
            Self::TestOtp => "Test OTP",
            Self::Logs => "Logs",
            Self::AdminUsers => "Manage Users",
            Self::AdminLogs => "Admin Logs",
        }
    }

    /// Backend collection the section's screen works against.
    pub fn endpoint(self) -> Option<&'static str> {
        match self {
            Self::Home => None,
            Self::Smtp => Some(api::SMTP_PATH),
            Self::Templates => Some(api::TEMPLATES_PATH),
            Self::ApiKeys => Some(api::API_KEYS_PATH),
            Self::TestOtp => Some(api::OTP_SEND_PATH),
            Self::Logs => Some(api::LOGS_PATH),
            Self::AdminUsers => Some(api::ADMIN_USERS_PATH),
            Self::AdminLogs => Some(api::ADMIN_LOGS_PATH),
        }
    }

    pub fn requires_admin(self) -> bool {
        Self::ADMIN.contains(&self)
    }
}

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "User",
        Role::Admin => "Administrator",
    }
}

/// Renders one dashboard section for the signed-in user.
#[component]
pub fn DashboardSectionPage(section: Section) -> impl IntoView {
    let session = expect_context::<SessionContext>();
    let config = ApiConfig::from_env();

    let greeting = move || {
        session
            .identity()
            .map(|i| format!("Welcome, {} ({})", i.full_name, role_label(i.role)))
            .unwrap_or_default()
    };
    let syncing = move || session.state().with(|s| s.is_resolving());

    view! {
        <section class="dashboard-section">
            <header class="dashboard-section__header">
                <h1>{section.label()}</h1>
                <p class="dashboard-section__greeting">{greeting}</p>
            </header>
            {match section.endpoint() {
                Some(path) => {
                    let url = config.url_for(path);
                    view! {
                        <p class="dashboard-section__endpoint">"Backed by " <code>{url}</code></p>
                    }
                        .into_any()
                }
                None => {
                    view! {
                        <button
                            class="btn"
                            disabled=syncing
                            on:click=move |_| session.refresh()
                        >
                            "Refresh account"
                        </button>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
