/// Submission form for cat posts
///
/// Create mode when opened empty, edit mode when opened with an existing
/// record (the presence of its id is the only switch). The form owns the
/// photo staging sequence and keeps a preview sequence aligned with it
/// index-for-index, so removals always touch both at the same position.

use std::path::PathBuf;

use iced::widget::image::Handle;
use iced::widget::{
    button, column, container, image, pick_list, row, scrollable, text, text_editor, text_input,
};
use iced::{Alignment, ContentFit, Element, Length, Task};
use log::{debug, warn};
use rfd::FileDialog;

use crate::api::cats::CatDraft;
use crate::api::{cats, ApiClient, ApiError};
use crate::photos;
use crate::state::data::{AgeGroup, Cat, Gender, LOCATIONS};
use crate::state::staging::{self, PhotoStaging, StagedPhoto};
use crate::ui;

const PREVIEW_SIZE: f32 = 84.0;

/// Preview slot, aligned with the staging sequence
#[derive(Debug, Clone)]
enum Preview {
    /// Stored photo still being fetched
    Loading,
    Ready(Handle),
    /// Bytes that would not decode; the slot stays removable
    Unavailable,
}

/// A file that came back from the picker: bytes for upload, a thumbnail
/// for display.
#[derive(Debug, Clone)]
pub struct PickedPhoto {
    path: PathBuf,
    bytes: Vec<u8>,
    preview: Option<Handle>,
}

pub struct FormScreen {
    /// Present in edit mode, absent in create mode
    id: Option<String>,
    name: String,
    age: Option<AgeGroup>,
    gender: Option<Gender>,
    location: String,
    description: text_editor::Content,
    staging: PhotoStaging,
    previews: Vec<Preview>,
    submitting: bool,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    LocationPicked(String),
    AgePicked(AgeGroup),
    GenderPicked(Gender),
    DescriptionEdited(text_editor::Action),
    AddPhotosPressed,
    PhotosPicked(Vec<PickedPhoto>),
    RemovePhoto(usize),
    StoredPreviewReady(String, Option<Handle>),
    CancelPressed,
    Submit,
    Saved(Result<Cat, ApiError>),
}

pub enum Action {
    None,
    Run(Task<Message>),
    /// The post was persisted; the embedding context decides where to go
    Saved,
    Cancelled,
}

impl FormScreen {
    pub fn create() -> Self {
        FormScreen {
            id: None,
            name: String::new(),
            age: None,
            gender: None,
            location: LOCATIONS[0].to_owned(),
            description: text_editor::Content::new(),
            staging: PhotoStaging::default(),
            previews: Vec::new(),
            submitting: false,
            error: None,
        }
    }

    /// Edit mode, pre-populated from the fetched record. Stored photos
    /// show up as previews once their bytes arrive.
    pub fn edit(cat: &Cat, api: &ApiClient) -> (Self, Task<Message>) {
        let paths: Vec<String> = cat.photos.iter().map(|photo| photo.url().to_owned()).collect();

        let fetches: Vec<Task<Message>> = paths
            .iter()
            .map(|path| {
                let api = api.clone();
                let path = path.clone();
                Task::perform(
                    async move {
                        let bytes = cats::photo(&api, &path).await.ok();
                        (path, bytes.as_deref().and_then(photos::thumbnail))
                    },
                    |(path, handle)| Message::StoredPreviewReady(path, handle),
                )
            })
            .collect();

        let screen = FormScreen {
            id: Some(cat.id.clone()),
            name: cat.name.clone(),
            age: Some(cat.age),
            gender: Some(cat.gender),
            location: if cat.location.is_empty() {
                LOCATIONS[0].to_owned()
            } else {
                cat.location.clone()
            },
            description: text_editor::Content::with_text(&cat.description),
            previews: vec![Preview::Loading; paths.len()],
            staging: PhotoStaging::from_persisted(paths),
            submitting: false,
            error: None,
        };

        (screen, Task::batch(fetches))
    }

    fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn update(&mut self, message: Message, api: &ApiClient) -> Action {
        match message {
            Message::NameChanged(name) => {
                self.name = name;
                Action::None
            }
            Message::LocationPicked(location) => {
                self.location = location;
                Action::None
            }
            Message::AgePicked(age) => {
                self.age = Some(age);
                Action::None
            }
            Message::GenderPicked(gender) => {
                self.gender = Some(gender);
                Action::None
            }
            Message::DescriptionEdited(action) => {
                self.description.perform(action);
                Action::None
            }
            Message::AddPhotosPressed => {
                let picked = FileDialog::new()
                    .set_title("Choose cat photos")
                    .add_filter("Images", &["jpg", "jpeg", "png"])
                    .pick_files();

                match picked {
                    Some(paths) => Action::Run(Task::perform(
                        read_picked(paths),
                        Message::PhotosPicked,
                    )),
                    None => Action::None,
                }
            }
            Message::PhotosPicked(picked) => {
                if picked.is_empty() {
                    return Action::None;
                }

                let mut files = Vec::with_capacity(picked.len());
                let mut fresh = Vec::with_capacity(picked.len());
                for photo in picked {
                    fresh.push(match photo.preview {
                        Some(handle) => Preview::Ready(handle),
                        None => Preview::Unavailable,
                    });
                    files.push((photo.path, photo.bytes));
                }

                // Previews of photos that stay staged (the local ones)
                // survive in order; stored-photo previews drop with their
                // staging entries
                let kept: Vec<Preview> = self
                    .staging
                    .photos()
                    .iter()
                    .zip(&self.previews)
                    .filter(|(photo, _)| photo.is_local())
                    .map(|(_, preview)| preview.clone())
                    .collect();

                if self.staging.add_local(files) {
                    self.previews = kept.into_iter().chain(fresh).collect();
                }
                Action::None
            }
            Message::RemovePhoto(index) => {
                self.staging.remove(index);
                if index < self.previews.len() {
                    self.previews.remove(index);
                }
                Action::None
            }
            Message::StoredPreviewReady(path, handle) => {
                // The entry may have dropped out of staging while the
                // bytes were in flight; that is fine, just ignore it
                let slot = self
                    .staging
                    .photos()
                    .iter()
                    .position(|photo| matches!(photo, StagedPhoto::Persisted(stored) if stored == &path));
                if let Some(preview) = slot.and_then(|index| self.previews.get_mut(index)) {
                    *preview = match handle {
                        Some(handle) => Preview::Ready(handle),
                        None => Preview::Unavailable,
                    };
                }
                Action::None
            }
            Message::CancelPressed => Action::Cancelled,
            Message::Submit => {
                if self.submitting {
                    return Action::None;
                }

                let description = self.description.text();
                let description = description.trim();

                // One aggregate gate before anything touches the network
                if self.name.trim().is_empty()
                    || description.is_empty()
                    || self.age.is_none()
                    || self.gender.is_none()
                {
                    self.error = Some("All fields marked with * are required.".to_owned());
                    return Action::None;
                }
                let (Some(age), Some(gender)) = (self.age, self.gender) else {
                    return Action::None;
                };

                self.submitting = true;
                self.error = None;

                let draft = CatDraft {
                    name: self.name.trim().to_owned(),
                    age,
                    gender,
                    location: self.location.clone(),
                    description: description.to_owned(),
                    photos: self.staging.uploads(),
                };

                let api = api.clone();
                let task = match self.id.clone() {
                    Some(id) => Task::perform(
                        async move { cats::update(&api, &id, draft).await },
                        Message::Saved,
                    ),
                    None => Task::perform(
                        async move { cats::create(&api, draft).await },
                        Message::Saved,
                    ),
                };
                Action::Run(task)
            }
            Message::Saved(Ok(cat)) => {
                debug!("post {} saved", cat.id);
                Action::Saved
            }
            Message::Saved(Err(e)) => {
                self.submitting = false;
                warn!("saving the post failed: {}", e);
                let fallback = if self.is_edit() {
                    "Could not update the post. Please try again."
                } else {
                    "Could not publish the post. Please try again."
                };
                self.error = Some(
                    e.server_message()
                        .map(str::to_owned)
                        .unwrap_or_else(|| fallback.to_owned()),
                );
                Action::None
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        if self.submitting {
            let message = if self.is_edit() {
                "Updating the post…"
            } else {
                "Publishing the post…"
            };
            return ui::loading(message);
        }

        let title = if self.is_edit() {
            "Edit cat post"
        } else {
            "Post a found cat"
        };
        let locations: Vec<String> = LOCATIONS.iter().map(|l| (*l).to_owned()).collect();

        let mut content = column![
            text(title).size(26),
            text_input("Cat's name *", &self.name).on_input(Message::NameChanged),
            row![
                pick_list(
                    locations,
                    Some(self.location.clone()),
                    Message::LocationPicked
                ),
                pick_list(&AgeGroup::ALL[..], self.age, Message::AgePicked).placeholder("Age *"),
                pick_list(&Gender::ALL[..], self.gender, Message::GenderPicked)
                    .placeholder("Gender *"),
            ]
            .spacing(12),
            text("Description * (health, collar details, personality)").size(13),
            text_editor(&self.description)
                .on_action(Message::DescriptionEdited)
                .height(Length::Fixed(120.0)),
            self.photo_section(),
        ]
        .spacing(12);

        if let Some(error) = &self.error {
            content = content.push(ui::error_panel(error));
        }

        let submit_label = if self.is_edit() {
            "Save changes"
        } else {
            "Publish post"
        };
        let mut actions = row![button(text(submit_label)).on_press(Message::Submit)].spacing(12);
        if self.is_edit() {
            actions = actions.push(
                button(text("Cancel"))
                    .style(button::secondary)
                    .on_press(Message::CancelPressed),
            );
        }
        content = content.push(actions);

        scrollable(container(content).padding(20.0))
            .height(Length::Fill)
            .into()
    }

    fn photo_section(&self) -> Element<'_, Message> {
        let mut section = column![row![
            text(format!(
                "Photos ({} of {})",
                self.staging.len(),
                staging::MAX_PHOTOS
            ))
            .size(14),
            button(text("Add photos").size(14))
                .style(button::secondary)
                .on_press(Message::AddPhotosPressed),
        ]
        .spacing(12)
        .align_y(Alignment::Center)]
        .spacing(8);

        if let Some(error) = self.staging.error() {
            section = section.push(ui::error_panel(error));
        }

        if self.staging.is_empty() {
            section = section
                .push(text("Good photos make reunions much more likely.").size(13));
        } else {
            let mut thumbs = row![].spacing(10);
            for (index, preview) in self.previews.iter().enumerate() {
                let slot: Element<'_, Message> = match preview {
                    Preview::Ready(handle) => image(handle.clone())
                        .width(Length::Fixed(PREVIEW_SIZE))
                        .height(Length::Fixed(PREVIEW_SIZE))
                        .content_fit(ContentFit::Cover)
                        .into(),
                    Preview::Loading => container(text("…"))
                        .center_x(Length::Fixed(PREVIEW_SIZE))
                        .center_y(Length::Fixed(PREVIEW_SIZE))
                        .style(container::rounded_box)
                        .into(),
                    Preview::Unavailable => container(text("?"))
                        .center_x(Length::Fixed(PREVIEW_SIZE))
                        .center_y(Length::Fixed(PREVIEW_SIZE))
                        .style(container::rounded_box)
                        .into(),
                };
                thumbs = thumbs.push(
                    column![
                        slot,
                        button(text("Remove").size(12))
                            .style(button::text)
                            .on_press(Message::RemovePhoto(index)),
                    ]
                    .spacing(4)
                    .align_x(Alignment::Center),
                );
            }
            section = section.push(thumbs);
        }

        section.into()
    }
}

/// Read the picked files off disk and pre-build their previews, skipping
/// anything unreadable or of an unsupported type.
async fn read_picked(paths: Vec<PathBuf>) -> Vec<PickedPhoto> {
    let mut picked = Vec::with_capacity(paths.len());
    for path in paths {
        if !staging::is_supported_photo(&path) {
            warn!("skipping unsupported file {}", path.display());
            continue;
        }
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let preview = photos::thumbnail(&bytes);
                picked.push(PickedPhoto {
                    path,
                    bytes,
                    preview,
                });
            }
            Err(e) => warn!("could not read {}: {}", path.display(), e),
        }
    }
    picked
}
