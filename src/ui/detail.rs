/// Single-post detail view
///
/// Fetches one record on entry and renders it read-only. The contact
/// action builds a WhatsApp deep link from the owner's phone number and
/// hands it to the platform URL opener; it is only enabled when the
/// record actually carries a phone number.

use iced::widget::image::Handle;
use iced::widget::{button, column, container, image, row, scrollable, text};
use iced::{ContentFit, Element, Length, Task};
use iced_aw::Wrap;
use log::{debug, warn};
use url::Url;

use crate::api::{cats, ApiClient, ApiError};
use crate::photos;
use crate::state::data::Cat;
use crate::ui;

const PHOTO_SIZE: f32 = 280.0;

pub struct DetailScreen {
    id: String,
    cat: Option<Cat>,
    /// One slot per stored photo, filled as the bytes arrive
    photo_slots: Vec<(String, Option<Handle>)>,
    loading: bool,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Result<Cat, ApiError>),
    PhotoReady(String, Option<Handle>),
    ContactPressed,
}

pub enum Action {
    None,
    Run(Task<Message>),
}

impl DetailScreen {
    pub fn new(api: &ApiClient, id: String) -> (Self, Task<Message>) {
        let api = api.clone();
        let fetch_id = id.clone();
        (
            DetailScreen {
                id,
                cat: None,
                photo_slots: Vec::new(),
                loading: true,
                error: None,
            },
            Task::perform(
                async move { cats::get(&api, &fetch_id).await },
                Message::Loaded,
            ),
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> Action {
        match message {
            Message::Loaded(Ok(cat)) => {
                self.loading = false;
                self.photo_slots = cat
                    .photos
                    .iter()
                    .map(|photo| (photo.url().to_owned(), None))
                    .collect();

                let mut fetches = Vec::with_capacity(self.photo_slots.len());
                for (path, _) in &self.photo_slots {
                    let api = api.clone();
                    let path = path.clone();
                    fetches.push(Task::perform(
                        async move {
                            let handle = cats::photo(&api, &path).await.ok().map(photos::full_size);
                            (path, handle)
                        },
                        |(path, handle)| Message::PhotoReady(path, handle),
                    ));
                }

                self.cat = Some(cat);
                Action::Run(Task::batch(fetches))
            }
            Message::Loaded(Err(e)) => {
                self.loading = false;
                warn!("post fetch failed: {}", e);
                self.error = Some("No cat found.".to_owned());
                Action::None
            }
            Message::PhotoReady(path, handle) => {
                match handle {
                    Some(handle) => {
                        if let Some(slot) = self.photo_slots.iter_mut().find(|(p, _)| p == &path) {
                            slot.1 = Some(handle);
                        }
                    }
                    // Unfetchable photo: drop its slot instead of leaving
                    // a placeholder up forever
                    None => self.photo_slots.retain(|(p, _)| p != &path),
                }
                Action::None
            }
            Message::ContactPressed => {
                let Some(cat) = &self.cat else {
                    return Action::None;
                };
                let Some(phone) = cat.user.as_ref().and_then(|owner| owner.phone.as_deref())
                else {
                    return Action::None;
                };

                match whatsapp_url(phone, &cat.name, &cat.description) {
                    Some(url) => open_external(&url),
                    None => warn!("could not build a contact link for {:?}", phone),
                }
                Action::None
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        if self.loading {
            return ui::loading("Loading…");
        }

        let Some(cat) = &self.cat else {
            return ui::empty_state(self.error.as_deref().unwrap_or("No cat found."));
        };

        let mut content = column![text(&cat.name).size(30)].spacing(14).padding(20.0);

        if !self.photo_slots.is_empty() {
            let shots: Vec<Element<'_, Message>> = self
                .photo_slots
                .iter()
                .map(|(_, handle)| match handle {
                    Some(handle) => image(handle.clone())
                        .width(Length::Fixed(PHOTO_SIZE))
                        .height(Length::Fixed(PHOTO_SIZE))
                        .content_fit(ContentFit::Contain)
                        .into(),
                    None => container(text("Loading photo…"))
                        .center_x(Length::Fixed(PHOTO_SIZE))
                        .center_y(Length::Fixed(PHOTO_SIZE))
                        .style(container::rounded_box)
                        .into(),
                })
                .collect();
            content = content.push(Wrap::with_elements(shots).spacing(10.0).line_spacing(10.0));
        }

        let status = if cat.adopted { "Adopted" } else { "Available" };
        let phone = cat.user.as_ref().and_then(|owner| owner.phone.as_deref());

        content = content
            .push(row![ui::chip(status.to_owned())])
            .push(text(format!("Age: {}", cat.age)).size(15))
            .push(text(format!("Gender: {}", cat.gender)).size(15))
            .push(text(format!("Location: {}", cat.location)).size(15))
            .push(text(&cat.description).size(15))
            .push(
                button(text("Contact via WhatsApp"))
                    .on_press_maybe(phone.is_some().then_some(Message::ContactPressed)),
            );

        scrollable(content).height(Length::Fill).into()
    }
}

/// `https://wa.me/<phone>?text=<message>` with the templated interest
/// message URL-encoded.
fn whatsapp_url(phone: &str, name: &str, description: &str) -> Option<Url> {
    let phone = phone.trim();
    if phone.is_empty() {
        return None;
    }

    let mut url = Url::parse(&format!("https://wa.me/{phone}")).ok()?;
    url.query_pairs_mut()
        .append_pair("text", &format!("Interested in {name}: {description}"));
    Some(url)
}

/// Hand a URL to the platform opener. Fire and forget; a failure to
/// spawn only costs the deep link.
fn open_external(url: &Url) {
    let launcher = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };

    debug!("opening {}", url);
    if let Err(e) = std::process::Command::new(launcher).arg(url.as_str()).spawn() {
        warn!("could not open {} with {}: {}", url, launcher, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_url_encodes_the_templated_message() {
        let url = whatsapp_url("919900112233", "Tom", "orange tabby").unwrap();
        assert_eq!(
            url.as_str(),
            "https://wa.me/919900112233?text=Interested+in+Tom%3A+orange+tabby"
        );
    }

    #[test]
    fn test_whatsapp_url_requires_a_phone_number() {
        assert!(whatsapp_url("", "Tom", "orange tabby").is_none());
        assert!(whatsapp_url("   ", "Tom", "orange tabby").is_none());
    }
}
