#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::*;
    use coursereviews::api;
    use coursereviews::app::App;
    use coursereviews::db::Database;
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};

    // Initialize the database and make sure the schema exists.
    let db_path =
        std::env::var("COURSE_REVIEWS_DB").unwrap_or_else(|_| "coursereviews.db".to_string());
    let db = Database::new(&db_path).unwrap();
    db.create_schema().await.unwrap();

    // Load configuration
    let conf = get_configuration(None).await.unwrap();
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in the Leptos App
    let routes = generate_route_list(App);
    println!("listening on http://{}", &addr);

    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;
        let db = db.clone();

        App::new()
            .app_data(web::Data::new(db))
            // Table-level API, registered BEFORE Leptos server functions
            .service(
                web::scope("/api")
                    .route("/session", web::get().to(api::current_session))
                    .route("/login", web::post().to(api::sign_in))
                    .route("/logout", web::post().to(api::sign_out))
                    .route("/courses", web::get().to(api::list_courses))
                    .route("/courses", web::post().to(api::upsert_course))
                    .route("/courses/{course_code}", web::get().to(api::get_course))
                    .route(
                        "/courses/{course_code}/reviews",
                        web::get().to(api::course_reviews),
                    )
                    .route("/review-counts", web::get().to(api::review_counts))
                    .route("/reviews", web::post().to(api::create_review))
                    .route("/reviews/{review_id}", web::put().to(api::update_review))
                    .route("/reviews/{review_id}", web::delete().to(api::delete_review))
                    .route("/my/reviews", web::get().to(api::my_reviews))
                    .route("/my/bookmarks", web::get().to(api::my_bookmarks))
                    .route("/bookmarks", web::post().to(api::add_bookmark))
                    .route(
                        "/bookmarks/{course_code}",
                        web::delete().to(api::remove_bookmark),
                    ),
            )
            // Register server functions
            .route("/api/{tail:.*}", leptos_actix::handle_server_fns())
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Serve other assets from the `assets` directory
            .service(Files::new("/assets", site_root))
            // Serve the favicon from /favicon.ico
            .service(favicon)
            // Register Leptos routes
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), App)
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(feature = "ssr")]
#[actix_web::get("favicon.ico")]
async fn favicon(
    leptos_options: actix_web::web::Data<leptos::LeptosOptions>,
) -> actix_web::Result<actix_files::NamedFile> {
    let leptos_options = leptos_options.into_inner();
    let site_root = &leptos_options.site_root;
    Ok(actix_files::NamedFile::open(format!(
        "{site_root}/favicon.ico"
    ))?)
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // unless we want this to work with e.g., Trunk for pure client-side testing
    // see lib.rs for hydration function instead
    // see optional feature `csr` instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // a client-side main function is required for using `trunk serve`
    // prefer using `cargo leptos serve` instead
    // to run: `trunk serve --open --features csr`
    use coursereviews::app::App;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
