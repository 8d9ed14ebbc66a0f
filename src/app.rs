//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::dashboard_layout::DashboardLayout;
use crate::components::route_guard::{RequireAdmin, RequireAuth};
use crate::components::session_provider::SessionProvider;
use crate::components::toast_host::ToastHost;
use crate::pages::dashboard::{DashboardSectionPage, Section};
use crate::pages::{login::LoginPage, register::RegisterPage};
use crate::state::guard::{LANDING_ROUTE, LOGIN_ROUTE};
use crate::state::toast::ToastState;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// A section any signed-in user may open.
fn protected(section: Section) -> impl IntoView {
    view! {
        <RequireAuth>
            <DashboardLayout>
                <DashboardSectionPage section=section/>
            </DashboardLayout>
        </RequireAuth>
    }
}

/// A section only admins may open.
fn admin_only(section: Section) -> impl IntoView {
    view! {
        <RequireAdmin>
            <DashboardLayout>
                <DashboardSectionPage section=section/>
            </DashboardLayout>
        </RequireAdmin>
    }
}

/// Root application component.
///
/// The session provider wraps the router so every guard reads the same
/// session, and the router only mounts once bootstrap has settled.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let toasts = RwSignal::new(ToastState::default());
    provide_context(toasts);

    view! {
        <Stylesheet id="leptos" href="/pkg/otp-dashboard.css"/>
        <Title text="OTP SaaS"/>

        <ToastHost/>
        <SessionProvider>
            <Router>
                <Routes fallback=|| view! { <Redirect path=LOGIN_ROUTE/> }>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=LANDING_ROUTE/> }/>

                    <Route path=StaticSegment("dashboard") view=|| protected(Section::Home)/>
                    <Route path=(StaticSegment("dashboard"), StaticSegment("smtp")) view=|| protected(Section::Smtp)/>
                    <Route
                        path=(StaticSegment("dashboard"), StaticSegment("templates"))
                        view=|| protected(Section::Templates)
                    />
                    <Route path=(StaticSegment("dashboard"), StaticSegment("apikeys")) view=|| protected(Section::ApiKeys)/>
                    <Route path=(StaticSegment("dashboard"), StaticSegment("test-otp")) view=|| protected(Section::TestOtp)/>
                    <Route path=(StaticSegment("dashboard"), StaticSegment("logs")) view=|| protected(Section::Logs)/>

                    <Route
                        path=(StaticSegment("dashboard"), StaticSegment("admin"), StaticSegment("users"))
                        view=|| admin_only(Section::AdminUsers)
                    />
                    <Route
                        path=(StaticSegment("dashboard"), StaticSegment("admin"), StaticSegment("logs"))
                        view=|| admin_only(Section::AdminLogs)
                    />
                </Routes>
            </Router>
        </SessionProvider>
    }
}
