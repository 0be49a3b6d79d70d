/// UI module
///
/// One submodule per routed view, plus the shared pieces:
/// - Navigation bar shown above every view (navbar.rs)
/// - Cat card used by the listing and the dashboard (card.rs)
/// - Login/register form (auth.rs)
/// - Public listing with filters (home.rs)
/// - Submission form for create and edit (form.rs)
/// - Owner dashboard with delete/edit (dashboard.rs)
/// - Single-post detail view (detail.rs)

pub mod auth;
pub mod card;
pub mod dashboard;
pub mod detail;
pub mod form;
pub mod home;
pub mod navbar;

use iced::widget::image::Handle;
use iced::widget::{center, container, mouse_area, opaque, stack, text};
use iced::{Color, Element, Length, Task, Theme};
use log::debug;

use crate::api::{cats, ApiClient};
use crate::photos;
use crate::state::data::Cat;

/// Full-area loading indicator, shown while a view's fetches are in
/// flight. A hung request leaves this up indefinitely; there is no
/// client-side timeout.
pub fn loading<'a, M: 'a>(message: &'a str) -> Element<'a, M> {
    container(text(message).size(18))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// Dashed-border-style box for "nothing here" states
pub fn empty_state<'a, M: 'a>(message: &'a str) -> Element<'a, M> {
    container(text(message).size(16))
        .width(Length::Fill)
        .padding(40.0)
        .center_x(Length::Fill)
        .style(container::rounded_box)
        .into()
}

/// Non-blocking inline error panel. The next user action clears it.
pub fn error_panel<'a, M: 'a>(message: &'a str) -> Element<'a, M> {
    container(text(message).size(14))
        .width(Length::Fill)
        .padding([8.0, 12.0])
        .style(danger_panel)
        .into()
}

fn danger_panel(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.danger.weak.color.into()),
        text_color: Some(palette.danger.weak.text),
        border: iced::border::rounded(6.0),
        ..container::Style::default()
    }
}

/// Small rounded label, used for age and status markers
pub fn chip<'a, M: 'a>(label: String) -> Element<'a, M> {
    container(text(label).size(12))
        .padding([3.0, 8.0])
        .style(chip_style)
        .into()
}

fn chip_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(palette.primary.weak.color.into()),
        text_color: Some(palette.primary.weak.text),
        border: iced::border::rounded(10.0),
        ..container::Style::default()
    }
}

/// Overlay `content` over `base` with a dimmed, click-to-dismiss backdrop.
pub fn modal<'a, M: Clone + 'a>(
    base: Element<'a, M>,
    content: Element<'a, M>,
    on_dismiss: M,
) -> Element<'a, M> {
    stack![
        base,
        opaque(mouse_area(center(opaque(content)).style(backdrop)).on_press(on_dismiss))
    ]
    .into()
}

fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Color { a: 0.6, ..Color::BLACK }.into()),
        ..container::Style::default()
    }
}

/// Fetch and downscale the cover photo of every listed cat, delivering
/// one (post id, handle) pair per photo as it lands. Fetch failures just
/// leave the card placeholder in place.
pub fn fetch_cover_thumbnails(api: &ApiClient, listing: &[Cat]) -> Task<(String, Option<Handle>)> {
    let fetches: Vec<_> = listing
        .iter()
        .filter_map(|cat| {
            let path = cat.cover_photo()?.url().to_owned();
            let id = cat.id.clone();
            let api = api.clone();
            Some(Task::perform(
                async move {
                    let bytes = match cats::photo(&api, &path).await {
                        Ok(bytes) => Some(bytes),
                        Err(e) => {
                            debug!("cover photo fetch failed for {}: {}", path, e);
                            None
                        }
                    };
                    (id, bytes.as_deref().and_then(photos::thumbnail))
                },
                |pair| pair,
            ))
        })
        .collect();

    Task::batch(fetches)
}
