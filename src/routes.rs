use crate::{
    api::{employee, leave_request},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter config
    fn build_limiter(requests_per_min: u32) -> GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap()
    }

    let read_limiter = build_limiter(config.rate_read_per_min);
    let write_limiter = build_limiter(config.rate_write_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(&read_limiter)) // rate limiting
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("").route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}").route(web::get().to(employee::get_employee)),
                    ),
            )
            .service(
                web::scope("/leave")
                    // /leave
                    .service(
                        web::resource("")
                            .route(web::get().to(leave_request::leave_list))
                            .route(web::post().to(leave_request::create_leave)),
                    )
                    // /leave/pending (before /{id}, fixed segments first)
                    .service(
                        web::resource("/pending")
                            .route(web::get().to(leave_request::pending_leaves)),
                    )
                    // /leave/summary
                    .service(
                        web::resource("/summary")
                            .route(web::get().to(leave_request::leave_summary)),
                    )
                    // /leave/{id}
                    .service(
                        web::resource("/{id}").route(web::get().to(leave_request::get_leave)),
                    )
                    // /leave/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .wrap(Governor::new(&write_limiter))
                            .route(web::put().to(leave_request::approve_leave)),
                    )
                    // /leave/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .wrap(Governor::new(&write_limiter))
                            .route(web::put().to(leave_request::reject_leave)),
                    )
                    // /leave/{id}/cancel
                    .service(
                        web::resource("/{id}/cancel")
                            .wrap(Governor::new(&write_limiter))
                            .route(web::put().to(leave_request::cancel_leave)),
                    ),
            ),
    );
}
