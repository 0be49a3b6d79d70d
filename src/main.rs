use iced::widget::column;
use iced::{Element, Task, Theme};
use log::{debug, info, warn};

mod api;
mod photos;
mod state;
mod ui;

use api::ApiClient;
use state::session::Session;
use ui::auth::AuthMode;
use ui::{auth, dashboard, detail, form, home, navbar};

/// The views the navigation bar and cards can reach. Post and Dashboard
/// are guarded: without a session token they redirect to Login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Post,
    Dashboard,
    Detail(String),
}

/// Top-level application messages, one wrapper variant per view.
///
/// A view message that arrives after navigating away (a late HTTP
/// response, typically) finds its view gone and is dropped; there is no
/// request cancellation.
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),
    Logout,
    Home(home::Message),
    Auth(auth::Message),
    Post(form::Message),
    Dashboard(dashboard::Message),
    Detail(detail::Message),
}

enum Screen {
    Home(home::HomeScreen),
    Auth(auth::AuthScreen),
    Post(form::FormScreen),
    Dashboard(dashboard::DashboardScreen),
    Detail(detail::DetailScreen),
}

/// Main application state
struct App {
    session: Session,
    api: ApiClient,
    screen: Screen,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let session = Session::load_or_default();
        let api = ApiClient::from_env(session.clone());
        info!(
            "starting {} session",
            if session.is_authenticated() {
                "an authenticated"
            } else {
                "an anonymous"
            }
        );

        let (screen, task) = home::HomeScreen::new(&api, session.is_authenticated());
        (
            App {
                session,
                api,
                screen: Screen::Home(screen),
            },
            task.map(Message::Home),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => self.navigate(route),
            Message::Logout => {
                info!("logging out");
                self.session.clear();
                self.navigate(Route::Home)
            }
            Message::Home(message) => {
                let Screen::Home(screen) = &mut self.screen else {
                    debug!("dropping home message for an inactive view");
                    return Task::none();
                };
                match screen.update(message, &self.api) {
                    home::Action::None => Task::none(),
                    home::Action::Run(task) => task.map(Message::Home),
                    home::Action::OpenDetail(id) => self.navigate(Route::Detail(id)),
                }
            }
            Message::Auth(message) => {
                let Screen::Auth(screen) = &mut self.screen else {
                    debug!("dropping auth message for an inactive view");
                    return Task::none();
                };
                match screen.update(message, &self.api) {
                    auth::Action::None => Task::none(),
                    auth::Action::Run(task) => task.map(Message::Auth),
                    auth::Action::LoggedIn(token) => {
                        self.session.set_token(&token);
                        info!("session established");
                        self.navigate(Route::Home)
                    }
                    auth::Action::Switch(mode) => self.navigate(match mode {
                        AuthMode::Login => Route::Login,
                        AuthMode::Register => Route::Register,
                    }),
                }
            }
            Message::Post(message) => {
                let Screen::Post(screen) = &mut self.screen else {
                    debug!("dropping form message for an inactive view");
                    return Task::none();
                };
                match screen.update(message, &self.api) {
                    form::Action::None => Task::none(),
                    form::Action::Run(task) => task.map(Message::Post),
                    // The standalone form has no embedding context, so
                    // success lands on the public listing
                    form::Action::Saved => self.navigate(Route::Home),
                    form::Action::Cancelled => self.navigate(Route::Home),
                }
            }
            Message::Dashboard(message) => {
                let Screen::Dashboard(screen) = &mut self.screen else {
                    debug!("dropping dashboard message for an inactive view");
                    return Task::none();
                };
                match screen.update(message, &self.api) {
                    dashboard::Action::None => Task::none(),
                    dashboard::Action::Run(task) => task.map(Message::Dashboard),
                    dashboard::Action::SessionExpired => {
                        warn!("session rejected by the server");
                        self.navigate(Route::Login)
                    }
                    dashboard::Action::OpenDetail(id) => self.navigate(Route::Detail(id)),
                    dashboard::Action::OpenPostForm => self.navigate(Route::Post),
                }
            }
            Message::Detail(message) => {
                let Screen::Detail(screen) = &mut self.screen else {
                    debug!("dropping detail message for an inactive view");
                    return Task::none();
                };
                match screen.update(message, &self.api) {
                    detail::Action::None => Task::none(),
                    detail::Action::Run(task) => task.map(Message::Detail),
                }
            }
        }
    }

    /// The one choke point for navigation, and therefore the route guard:
    /// guarded views check token presence here on every pass. Validity is
    /// the server's call, not ours.
    fn navigate(&mut self, route: Route) -> Task<Message> {
        let route = match route {
            Route::Post | Route::Dashboard if !self.session.is_authenticated() => {
                info!("redirecting to login: no session token");
                Route::Login
            }
            route => route,
        };

        match route {
            Route::Home => {
                let (screen, task) = home::HomeScreen::new(&self.api, self.session.is_authenticated());
                self.screen = Screen::Home(screen);
                task.map(Message::Home)
            }
            Route::Login => {
                self.screen = Screen::Auth(auth::AuthScreen::new(AuthMode::Login));
                Task::none()
            }
            Route::Register => {
                self.screen = Screen::Auth(auth::AuthScreen::new(AuthMode::Register));
                Task::none()
            }
            Route::Post => {
                self.screen = Screen::Post(form::FormScreen::create());
                Task::none()
            }
            Route::Dashboard => {
                let (screen, task) = dashboard::DashboardScreen::new(&self.api);
                self.screen = Screen::Dashboard(screen);
                task.map(Message::Dashboard)
            }
            Route::Detail(id) => {
                let (screen, task) = detail::DetailScreen::new(&self.api, id);
                self.screen = Screen::Detail(screen);
                task.map(Message::Detail)
            }
        }
    }

    /// The route the current screen lives at, for the navigation bar
    fn route(&self) -> Route {
        match &self.screen {
            Screen::Home(_) => Route::Home,
            Screen::Auth(screen) => match screen.mode() {
                AuthMode::Login => Route::Login,
                AuthMode::Register => Route::Register,
            },
            Screen::Post(_) => Route::Post,
            Screen::Dashboard(_) => Route::Dashboard,
            Screen::Detail(screen) => Route::Detail(screen.id().to_owned()),
        }
    }

    fn view(&self) -> Element<Message> {
        let body = match &self.screen {
            Screen::Home(screen) => screen.view().map(Message::Home),
            Screen::Auth(screen) => screen.view().map(Message::Auth),
            Screen::Post(screen) => screen.view().map(Message::Post),
            Screen::Dashboard(screen) => screen.view().map(Message::Dashboard),
            Screen::Detail(screen) => screen.view().map(Message::Detail),
        };

        column![
            navbar::view(&self.route(), self.session.is_authenticated()),
            body
        ]
        .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    pretty_env_logger::init();

    iced::application("KittyFind", App::update, App::view)
        .theme(App::theme)
        .window_size((1100.0, 760.0))
        .centered()
        .run_with(App::new)
}
