//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{CookiePolicy, ServerConfig};

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::admin::{delete_account, list_accounts, update_account_roles};
use backend::inbound::http::assignments::{
    create_assignment, get_assignment, list_assignments, my_assignments,
    update_assignment_status, withdraw_assignment,
};
use backend::inbound::http::auth::{current_session, login, logout};
use backend::inbound::http::disasters::{
    delete_disaster, get_disaster, list_disasters, report_disaster, resolve_disaster,
    update_disaster,
};
use backend::inbound::http::donations::{
    get_donation, list_donations, my_donations, pledge_donation, update_donation_status,
};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::missions::{
    create_mission, get_mission, list_missions, my_missions, update_mission,
    update_mission_status,
};
use backend::inbound::http::reports::{admin_dashboard, relief_overview};
use backend::inbound::http::resource_requests::{
    fulfil_resource_request, get_resource_request, list_resource_requests, open_resource_request,
    update_resource_request_status, withdraw_resource_request,
};
use backend::inbound::http::resources::{
    create_category, create_resource, delete_category, delete_resource, get_resource,
    list_categories, list_low_stock_resources, list_resources, update_category, update_resource,
};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::volunteers::{
    get_volunteer, list_volunteers, my_volunteer_profile, register_volunteer, update_volunteer,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Everything one worker needs to assemble its `App` instance.
#[derive(Clone)]
struct AppWiring {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cookies: CookiePolicy,
}

/// Cookie sessions carry a two hour rolling TTL; every response refreshes
/// the deadline.
fn session_layer(cookies: CookiePolicy) -> SessionMiddleware<CookieSessionStore> {
    let CookiePolicy {
        key,
        secure,
        same_site,
    } = cookies;
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(CookieDuration::hours(2)))
        .build()
}

fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(login).service(logout).service(current_session);
}

fn disaster_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(report_disaster)
        .service(list_disasters)
        .service(get_disaster)
        .service(update_disaster)
        .service(resolve_disaster)
        .service(delete_disaster);
}

fn volunteer_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register_volunteer)
        .service(list_volunteers)
        .service(my_volunteer_profile)
        .service(get_volunteer)
        .service(update_volunteer);
}

fn donation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(pledge_donation)
        .service(list_donations)
        .service(my_donations)
        .service(get_donation)
        .service(update_donation_status);
}

fn assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_assignment)
        .service(list_assignments)
        .service(my_assignments)
        .service(get_assignment)
        .service(update_assignment_status)
        .service(withdraw_assignment);
}

fn mission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_mission)
        .service(list_missions)
        .service(my_missions)
        .service(get_mission)
        .service(update_mission)
        .service(update_mission_status);
}

fn inventory_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create_category)
        .service(list_categories)
        .service(update_category)
        .service(delete_category)
        .service(create_resource)
        .service(list_resources)
        .service(list_low_stock_resources)
        .service(get_resource)
        .service(update_resource)
        .service(delete_resource);
}

fn request_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(open_resource_request)
        .service(list_resource_requests)
        .service(get_resource_request)
        .service(fulfil_resource_request)
        .service(update_resource_request_status)
        .service(withdraw_resource_request);
}

fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_accounts)
        .service(update_account_roles)
        .service(delete_account);
}

fn report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(relief_overview).service(admin_dashboard);
}

fn build_app(
    wiring: AppWiring,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppWiring {
        health_state,
        http_state,
        cookies,
    } = wiring;

    // Literal segments (`/me`, `/mine`, `/low-stock`) register ahead of
    // their `/{id}` siblings inside each group so the path parameter never
    // shadows them.
    let api = web::scope("/api")
        .wrap(session_layer(cookies))
        .configure(auth_routes)
        .configure(disaster_routes)
        .configure(volunteer_routes)
        .configure(donation_routes)
        .configure(assignment_routes)
        .configure(mission_routes)
        .configure(inventory_routes)
        .configure(request_routes)
        .configure(admin_routes)
        .configure(report_routes);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and spawn the HTTP server.
///
/// One [`HttpState`] is wired up front and shared by every worker; each
/// worker clones the wiring and assembles its own `App`. Readiness flips
/// only after `bind` succeeds, so `/health/ready` answers 503 until the
/// socket is live.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let worker_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        cookies,
        bind_addr,
        pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppWiring {
            health_state: worker_health_state.clone(),
            http_state: http_state.clone(),
            cookies: cookies.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
