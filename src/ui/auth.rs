/// Login and register forms
///
/// One screen for both modes; the only differences are the extra profile
/// fields on registration and which endpoint the submission hits. A
/// successful submission hands the fresh token up to the shell, which
/// stores it in the session and returns to the listing.

use iced::widget::{button, column, container, pick_list, text, text_input};
use iced::{Element, Length, Task};

use crate::api::auth::{LoginRequest, RegisterRequest};
use crate::api::{auth, ApiClient, ApiError};
use crate::state::data::LOCATIONS;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

pub struct AuthScreen {
    mode: AuthMode,
    email: String,
    password: String,
    name: String,
    phone: String,
    location: String,
    submitting: bool,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    EmailChanged(String),
    PasswordChanged(String),
    NameChanged(String),
    PhoneChanged(String),
    LocationPicked(String),
    SwitchPressed,
    Submit,
    Finished(Result<String, ApiError>),
}

pub enum Action {
    None,
    Run(Task<Message>),
    /// Token issued by the service; the shell stores it
    LoggedIn(String),
    Switch(AuthMode),
}

impl AuthScreen {
    pub fn new(mode: AuthMode) -> Self {
        AuthScreen {
            mode,
            email: String::new(),
            password: String::new(),
            name: String::new(),
            phone: String::new(),
            location: LOCATIONS[0].to_owned(),
            submitting: false,
            error: None,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> Action {
        match message {
            Message::EmailChanged(email) => {
                self.email = email;
                Action::None
            }
            Message::PasswordChanged(password) => {
                self.password = password;
                Action::None
            }
            Message::NameChanged(name) => {
                self.name = name;
                Action::None
            }
            Message::PhoneChanged(phone) => {
                self.phone = phone;
                Action::None
            }
            Message::LocationPicked(location) => {
                self.location = location;
                Action::None
            }
            Message::SwitchPressed => Action::Switch(match self.mode {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            }),
            Message::Submit => {
                if self.submitting {
                    return Action::None;
                }

                let missing = self.email.trim().is_empty()
                    || self.password.is_empty()
                    || (self.mode == AuthMode::Register
                        && (self.name.trim().is_empty() || self.phone.trim().is_empty()));
                if missing {
                    self.error = Some("All fields are required.".to_owned());
                    return Action::None;
                }

                self.submitting = true;
                self.error = None;

                let api = api.clone();
                let task = match self.mode {
                    AuthMode::Login => {
                        let request = LoginRequest {
                            email: self.email.trim().to_owned(),
                            password: self.password.clone(),
                        };
                        Task::perform(
                            async move { auth::login(&api, &request).await },
                            Message::Finished,
                        )
                    }
                    AuthMode::Register => {
                        let request = RegisterRequest {
                            email: self.email.trim().to_owned(),
                            password: self.password.clone(),
                            name: self.name.trim().to_owned(),
                            phone: self.phone.trim().to_owned(),
                            location: self.location.clone(),
                        };
                        Task::perform(
                            async move { auth::register(&api, &request).await },
                            Message::Finished,
                        )
                    }
                };
                Action::Run(task)
            }
            Message::Finished(Ok(token)) => Action::LoggedIn(token),
            Message::Finished(Err(e)) => {
                self.submitting = false;
                self.error = Some(e.to_string());
                Action::None
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        if self.submitting {
            let message = match self.mode {
                AuthMode::Login => "Logging in…",
                AuthMode::Register => "Creating your account…",
            };
            return ui::loading(message);
        }

        let is_register = self.mode == AuthMode::Register;
        let title = if is_register { "Register" } else { "Login" };

        let mut form = column![text(title).size(28)].spacing(12);

        if is_register {
            let locations: Vec<String> = LOCATIONS.iter().map(|l| (*l).to_owned()).collect();
            form = form
                .push(text_input("Name", &self.name).on_input(Message::NameChanged))
                .push(text_input("Phone", &self.phone).on_input(Message::PhoneChanged))
                .push(pick_list(
                    locations,
                    Some(self.location.clone()),
                    Message::LocationPicked,
                ));
        }

        form = form
            .push(text_input("Email", &self.email).on_input(Message::EmailChanged))
            .push(
                text_input("Password", &self.password)
                    .on_input(Message::PasswordChanged)
                    .on_submit(Message::Submit)
                    .secure(true),
            )
            .push(
                button(text(title))
                    .width(Length::Fill)
                    .on_press(Message::Submit),
            );

        if let Some(error) = &self.error {
            form = form.push(ui::error_panel(error));
        }

        let switch_label = if is_register {
            "Already have an account? Login"
        } else {
            "Need an account? Register"
        };
        form = form.push(
            button(text(switch_label).size(14))
                .style(button::text)
                .on_press(Message::SwitchPressed),
        );

        container(form.width(Length::Fixed(380.0)))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }
}
