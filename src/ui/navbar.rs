/// Navigation bar shown above every view

use iced::widget::{button, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length, Theme};

use crate::{Message, Route};

pub fn view(current: &Route, authenticated: bool) -> Element<'static, Message> {
    let mut bar = row![
        text("🐾 KittyFind").size(22),
        link("Home", Route::Home, current),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    if authenticated {
        bar = bar
            .push(link("Post a cat", Route::Post, current))
            .push(link("Dashboard", Route::Dashboard, current))
            .push(horizontal_space())
            .push(
                button(text("Log out"))
                    .style(button::secondary)
                    .on_press(Message::Logout),
            );
    } else {
        bar = bar
            .push(horizontal_space())
            .push(link("Log in", Route::Login, current))
            .push(button(text("Register")).on_press(Message::Navigate(Route::Register)));
    }

    container(bar)
        .width(Length::Fill)
        .padding([10.0, 16.0])
        .style(container::bordered_box)
        .into()
}

fn link(label: &'static str, route: Route, current: &Route) -> Element<'static, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if *current == route {
        button::primary
    } else {
        button::text
    };

    button(text(label))
        .style(style)
        .on_press(Message::Navigate(route))
        .into()
}
