/// Application shell: shared meta, router, and the page routes. Each page
/// does its own session check on load; the router only maps paths.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::components::bookmarks::BookmarksPage;
use crate::components::browse_page::BrowsePage;
use crate::components::course_page::CoursePage;
use crate::components::landing::LandingPage;
use crate::components::profile::ProfilePage;
use crate::components::submit_review::SubmitReviewPage;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/coursereviews.css"/>
        <Title text="BITS Course Reviews"/>
        <Router>
            <Routes>
                <Route path="/" view=LandingPage/>
                <Route path="/home" view=BrowsePage/>
                <Route path="/course/:course_code" view=CoursePage/>
                <Route path="/submit-review" view=SubmitReviewPage/>
                <Route path="/profile" view=ProfilePage/>
                <Route path="/bookmarks" view=BookmarksPage/>
            </Routes>
        </Router>
    }
}
