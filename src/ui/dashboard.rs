/// Owner dashboard
///
/// The only view that actually checks token validity: it starts from the
/// current-user lookup, and a 401 there bounces straight to the login
/// view. Everything else keeps rendering with a non-fatal error panel.
/// Deletes are optimistic: the row leaves the local list on confirmation,
/// before the server answers.

use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text};
use iced::{Alignment, Element, Length, Task};
use iced_aw::Wrap;
use log::{debug, info, warn};

use crate::api::{auth, cats, ApiClient, ApiError};
use crate::state::data::{Cat, User};
use crate::state::filter::owned_by;
use crate::ui;
use crate::ui::card::{self, CARD_WIDTH};
use crate::ui::form::{self, FormScreen};

pub struct DashboardScreen {
    user: Option<User>,
    /// This user's posts only; a view-local copy, resynchronized in full
    /// after every write
    cats: Vec<Cat>,
    thumbnails: HashMap<String, Handle>,
    loading: bool,
    error: Option<String>,
    /// Post awaiting delete confirmation
    pending_delete: Option<String>,
    /// Edit form, rendered in a modal overlay
    editing: Option<FormScreen>,
}

#[derive(Debug, Clone)]
pub enum Message {
    UserLoaded(Result<User, ApiError>),
    CatsLoaded(Result<Vec<Cat>, ApiError>),
    ThumbnailReady(String, Option<Handle>),
    CardPressed(String),
    PostPressed,
    EditPressed(String),
    DeletePressed(String),
    ConfirmDelete,
    CancelDelete,
    Deleted(String, Result<(), ApiError>),
    Form(form::Message),
    DismissEdit,
}

pub enum Action {
    None,
    Run(Task<Message>),
    /// The token was rejected with a 401; head to the login view
    SessionExpired,
    OpenDetail(String),
    OpenPostForm,
}

impl DashboardScreen {
    pub fn new(api: &ApiClient) -> (Self, Task<Message>) {
        let me_api = api.clone();
        (
            DashboardScreen {
                user: None,
                cats: Vec::new(),
                thumbnails: HashMap::new(),
                loading: true,
                error: None,
                pending_delete: None,
                editing: None,
            },
            Task::perform(async move { auth::me(&me_api).await }, Message::UserLoaded),
        )
    }

    fn fetch_posts(&self, api: &ApiClient) -> Task<Message> {
        let api = api.clone();
        Task::perform(async move { cats::list(&api).await }, Message::CatsLoaded)
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> Action {
        match message {
            Message::UserLoaded(Ok(user)) => {
                self.user = Some(user);
                Action::Run(self.fetch_posts(api))
            }
            Message::UserLoaded(Err(e)) => {
                if e.is_unauthorized() {
                    info!("current-user lookup returned 401; session is stale");
                    return Action::SessionExpired;
                }
                self.loading = false;
                warn!("current-user fetch failed: {}", e);
                self.error = Some("Failed to load your profile.".to_owned());
                Action::None
            }
            Message::CatsLoaded(Ok(listing)) => {
                self.loading = false;
                let Some(user) = &self.user else {
                    return Action::None;
                };
                self.cats = owned_by(listing, &user.id);
                self.error = None;
                Action::Run(
                    ui::fetch_cover_thumbnails(api, &self.cats)
                        .map(|(id, handle)| Message::ThumbnailReady(id, handle)),
                )
            }
            Message::CatsLoaded(Err(e)) => {
                self.loading = false;
                warn!("post list fetch failed: {}", e);
                self.error = Some("Failed to refresh your posts.".to_owned());
                Action::None
            }
            Message::ThumbnailReady(id, handle) => {
                if let Some(handle) = handle {
                    self.thumbnails.insert(id, handle);
                }
                Action::None
            }
            Message::CardPressed(id) => Action::OpenDetail(id),
            Message::PostPressed => Action::OpenPostForm,
            Message::EditPressed(id) => {
                let Some(cat) = self.cats.iter().find(|cat| cat.id == id) else {
                    return Action::None;
                };
                let (screen, task) = FormScreen::edit(cat, api);
                self.editing = Some(screen);
                Action::Run(task.map(Message::Form))
            }
            Message::Form(message) => {
                let Some(editing) = &mut self.editing else {
                    debug!("ignoring form message with no edit modal open");
                    return Action::None;
                };
                match editing.update(message, api) {
                    form::Action::None => Action::None,
                    form::Action::Run(task) => Action::Run(task.map(Message::Form)),
                    form::Action::Saved => {
                        // Close the modal and resynchronize in full with
                        // the remote truth; no partial patching
                        self.editing = None;
                        Action::Run(self.fetch_posts(api))
                    }
                    form::Action::Cancelled => {
                        self.editing = None;
                        Action::None
                    }
                }
            }
            Message::DismissEdit => {
                self.editing = None;
                Action::None
            }
            Message::DeletePressed(id) => {
                self.pending_delete = Some(id);
                Action::None
            }
            Message::CancelDelete => {
                self.pending_delete = None;
                Action::None
            }
            Message::ConfirmDelete => {
                let Some(id) = self.pending_delete.take() else {
                    return Action::None;
                };

                // Optimistic: the row leaves the visible list now, the
                // request follows. A failed delete keeps the row gone
                // until the next full fetch
                self.cats.retain(|cat| cat.id != id);
                self.thumbnails.remove(&id);

                let api = api.clone();
                Action::Run(Task::perform(
                    async move {
                        let result = cats::delete(&api, &id).await;
                        (id, result)
                    },
                    |(id, result)| Message::Deleted(id, result),
                ))
            }
            Message::Deleted(id, Ok(())) => {
                debug!("post {} deleted", id);
                Action::None
            }
            Message::Deleted(id, Err(e)) => {
                warn!("deleting post {} failed: {}", id, e);
                self.error = Some(format!("Deleting the post failed: {e}"));
                Action::None
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        if self.loading {
            return ui::loading("Loading your dashboard…");
        }

        let mut content = column![self.header()].spacing(16).padding(20.0);

        if let Some(error) = &self.error {
            content = content.push(ui::error_panel(error));
        }

        content = content.push(text("Your active posts").size(20));

        let posts: Element<'_, Message> = if self.cats.is_empty() {
            column![
                ui::empty_state("It looks like you haven't posted any cat sightings yet."),
                container(
                    button(text("Start posting now")).on_press(Message::PostPressed)
                )
                .width(Length::Fill)
                .center_x(Length::Fill),
            ]
            .spacing(12)
            .into()
        } else {
            let cards: Vec<Element<'_, Message>> =
                self.cats.iter().map(|cat| self.post_card(cat)).collect();
            Wrap::with_elements(cards)
                .spacing(16.0)
                .line_spacing(16.0)
                .into()
        };
        content = content.push(posts);

        let base: Element<'_, Message> = scrollable(content).height(Length::Fill).into();

        match &self.editing {
            Some(editing) => ui::modal(
                base,
                container(editing.view().map(Message::Form))
                    .width(Length::Fixed(560.0))
                    .max_height(680.0)
                    .padding(16.0)
                    .style(container::rounded_box)
                    .into(),
                Message::DismissEdit,
            ),
            None => base,
        }
    }

    fn header(&self) -> Element<'_, Message> {
        let name = self
            .user
            .as_ref()
            .map(|user| user.name.as_str())
            .unwrap_or("there");

        row![
            column![
                text(format!("Welcome back, {name}!")).size(24),
                text(format!("Manage your {} reported sightings.", self.cats.len())).size(14),
            ]
            .spacing(4),
            horizontal_space(),
            button(text("Post new cat")).on_press(Message::PostPressed),
        ]
        .align_y(Alignment::Center)
        .into()
    }

    fn post_card<'a>(&'a self, cat: &'a Cat) -> Element<'a, Message> {
        let card = card::cat_card(
            cat,
            self.thumbnails.get(&cat.id),
            Message::CardPressed(cat.id.clone()),
            false,
        );

        let actions: Element<'a, Message> = if self.pending_delete.as_deref() == Some(cat.id.as_str()) {
            row![
                text("Delete this post?").size(13),
                horizontal_space(),
                button(text("Delete").size(13))
                    .style(button::danger)
                    .on_press(Message::ConfirmDelete),
                button(text("Keep").size(13))
                    .style(button::secondary)
                    .on_press(Message::CancelDelete),
            ]
            .spacing(8)
            .align_y(Alignment::Center)
            .into()
        } else {
            let status = if cat.adopted { "Adopted" } else { "Active" };
            row![
                ui::chip(status.to_owned()),
                horizontal_space(),
                button(text("Edit").size(13))
                    .style(button::secondary)
                    .on_press(Message::EditPressed(cat.id.clone())),
                button(text("Delete").size(13))
                    .style(button::danger)
                    .on_press(Message::DeletePressed(cat.id.clone())),
            ]
            .spacing(8)
            .align_y(Alignment::Center)
            .into()
        };

        container(column![card, actions].spacing(8))
            .width(Length::Fixed(CARD_WIDTH))
            .into()
    }
}
