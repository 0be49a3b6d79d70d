/// Public listing of reported sightings
///
/// Fetches the full collection (and, when a token is present, the current
/// user) on entry, then filters it client-side. The collection is never
/// mutated: the visible slice is re-derived from the fetched data and the
/// active predicates on every render.

use std::collections::HashMap;

use iced::widget::image::Handle;
use iced::widget::{button, column, horizontal_space, pick_list, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Task};
use iced_aw::Wrap;
use log::warn;

use crate::api::{auth, cats, ApiClient, ApiError};
use crate::state::data::{AgeGroup, Cat, User};
use crate::state::filter::{location_options, CatFilter};
use crate::ui;
use crate::ui::card;

pub struct HomeScreen {
    cats: Vec<Cat>,
    user: Option<User>,
    filter: CatFilter,
    thumbnails: HashMap<String, Handle>,
    /// Fetches still in flight; the loading state clears when this hits 0
    pending_fetches: usize,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    CatsLoaded(Result<Vec<Cat>, ApiError>),
    UserLoaded(Result<User, ApiError>),
    ThumbnailReady(String, Option<Handle>),
    SearchChanged(String),
    LocationPicked(String),
    AgePicked(AgeGroup),
    FiltersCleared,
    CardPressed(String),
}

pub enum Action {
    None,
    Run(Task<Message>),
    OpenDetail(String),
}

impl HomeScreen {
    pub fn new(api: &ApiClient, authenticated: bool) -> (Self, Task<Message>) {
        // The collection fetch and the optional user fetch go out
        // together; completion order does not matter because they land in
        // separate fields
        let mut fetches = Vec::new();

        let list_api = api.clone();
        fetches.push(Task::perform(
            async move { cats::list(&list_api).await },
            Message::CatsLoaded,
        ));

        if authenticated {
            let me_api = api.clone();
            fetches.push(Task::perform(
                async move { auth::me(&me_api).await },
                Message::UserLoaded,
            ));
        }

        (
            HomeScreen {
                cats: Vec::new(),
                user: None,
                filter: CatFilter::default(),
                thumbnails: HashMap::new(),
                pending_fetches: fetches.len(),
                error: None,
            },
            Task::batch(fetches),
        )
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> Action {
        match message {
            Message::CatsLoaded(Ok(cats)) => {
                self.pending_fetches = self.pending_fetches.saturating_sub(1);
                self.cats = cats;
                self.error = None;
                Action::Run(
                    ui::fetch_cover_thumbnails(api, &self.cats)
                        .map(|(id, handle)| Message::ThumbnailReady(id, handle)),
                )
            }
            Message::CatsLoaded(Err(e)) => {
                self.pending_fetches = self.pending_fetches.saturating_sub(1);
                warn!("cat list fetch failed: {}", e);
                self.error = Some("Failed to load the latest sightings.".to_owned());
                Action::None
            }
            Message::UserLoaded(Ok(user)) => {
                self.pending_fetches = self.pending_fetches.saturating_sub(1);
                self.user = Some(user);
                Action::None
            }
            Message::UserLoaded(Err(e)) => {
                self.pending_fetches = self.pending_fetches.saturating_sub(1);
                // This lookup is optional here: a failure loses the
                // greeting, never the listing
                warn!("current-user fetch failed: {}", e);
                Action::None
            }
            Message::ThumbnailReady(id, handle) => {
                if let Some(handle) = handle {
                    self.thumbnails.insert(id, handle);
                }
                Action::None
            }
            Message::SearchChanged(search) => {
                self.filter.search = search;
                Action::None
            }
            Message::LocationPicked(location) => {
                self.filter.location = Some(location);
                Action::None
            }
            Message::AgePicked(age) => {
                self.filter.age = Some(age);
                Action::None
            }
            Message::FiltersCleared => {
                self.filter.clear();
                Action::None
            }
            Message::CardPressed(id) => Action::OpenDetail(id),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        if self.pending_fetches > 0 {
            return ui::loading("Loading the feline directory…");
        }

        let mut content = column![
            text("Lost & Found Felines").size(30),
            text("Browse the latest reported sightings or post a found cat.").size(15),
            self.filter_bar(),
        ]
        .spacing(14)
        .padding(20.0);

        if let Some(error) = &self.error {
            content = content.push(ui::error_panel(error));
        }

        let visible = self.filter.apply(&self.cats);
        let listing: Element<'_, Message> = if visible.is_empty() {
            let message = if self.filter.is_active() {
                "No matches found. Try adjusting your filters or search terms."
            } else {
                "No recent sightings posted yet."
            };
            ui::empty_state(message)
        } else {
            let cards: Vec<Element<'_, Message>> = visible
                .into_iter()
                .map(|cat| {
                    card::cat_card(
                        cat,
                        self.thumbnails.get(&cat.id),
                        Message::CardPressed(cat.id.clone()),
                        true,
                    )
                })
                .collect();
            Wrap::with_elements(cards)
                .spacing(16.0)
                .line_spacing(16.0)
                .into()
        };
        content = content.push(listing);

        scrollable(content).height(Length::Fill).into()
    }

    fn filter_bar(&self) -> Element<'_, Message> {
        let locations = location_options(&self.cats);

        let mut bar = row![
            text_input("Quick search by name or location…", &self.filter.search)
                .on_input(Message::SearchChanged)
                .width(Length::FillPortion(2)),
            pick_list(
                locations,
                self.filter.location.clone(),
                Message::LocationPicked
            )
            .placeholder("Any location"),
            pick_list(&AgeGroup::ALL[..], self.filter.age, Message::AgePicked)
                .placeholder("Any age"),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        if self.filter.is_active() {
            bar = bar.push(
                button(text("Clear"))
                    .style(button::text)
                    .on_press(Message::FiltersCleared),
            );
        }

        if let Some(user) = &self.user {
            bar = bar.push(horizontal_space());
            bar = bar.push(text(format!("Signed in as {}", user.name)).size(14));
        }

        bar.into()
    }
}
