/// Cat card shown in the listing grid and on the dashboard

use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, image, row, text};
use iced::{Alignment, ContentFit, Element, Length};

use crate::state::data::Cat;
use crate::ui;

/// Width and photo height of a card
pub const CARD_WIDTH: f32 = 230.0;
const PHOTO_SIZE: f32 = 206.0;
const SUMMARY_LIMIT: usize = 90;

pub fn cat_card<'a, M: Clone + 'a>(
    cat: &'a Cat,
    thumbnail: Option<&Handle>,
    on_open: M,
    show_owner: bool,
) -> Element<'a, M> {
    let photo: Element<'a, M> = match thumbnail {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(PHOTO_SIZE))
            .height(Length::Fixed(PHOTO_SIZE))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("No photo yet").size(14))
            .center_x(Length::Fixed(PHOTO_SIZE))
            .center_y(Length::Fixed(PHOTO_SIZE))
            .style(container::rounded_box)
            .into(),
    };

    let header = row![
        text(&cat.name).size(19),
        horizontal_space(),
        ui::chip(cat.age.to_string()),
    ]
    .align_y(Alignment::Center);

    let mut details = column![
        photo,
        header,
        text(format!("{} · {}", cat.location, cat.gender)).size(13),
        text(summary(&cat.description)).size(13),
    ]
    .spacing(6);

    if show_owner {
        if let Some(owner) = cat.user.as_ref().and_then(|owner| owner.name.as_deref()) {
            details = details.push(text(format!("Posted by {owner}")).size(11));
        }
    }

    details = details.push(
        button(text("View details").size(14))
            .width(Length::Fill)
            .on_press(on_open),
    );

    container(details)
        .width(Length::Fixed(CARD_WIDTH))
        .padding(12.0)
        .style(container::bordered_box)
        .into()
}

/// Clamp a description for card display, with the listing fallback when
/// the post carries none.
fn summary(description: &str) -> String {
    if description.is_empty() {
        return "No detailed sighting description available.".to_owned();
    }

    let mut clamped: String = description.chars().take(SUMMARY_LIMIT).collect();
    if description.chars().count() > SUMMARY_LIMIT {
        clamped.push('…');
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_keeps_short_descriptions_intact() {
        assert_eq!(summary("orange tabby"), "orange tabby");
    }

    #[test]
    fn test_summary_clamps_long_descriptions() {
        let long = "a".repeat(200);
        let clamped = summary(&long);
        assert_eq!(clamped.chars().count(), SUMMARY_LIMIT + 1);
        assert!(clamped.ends_with('…'));
    }

    #[test]
    fn test_summary_falls_back_when_empty() {
        assert!(summary("").contains("No detailed sighting description"));
    }
}
