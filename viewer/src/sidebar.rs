use crate::map_view::to_color;
use crate::Message;
use arsenalcore::catalog::CatalogRecord;
use arsenalcore::render::category_color;
use arsenalcore::session::NO_MATCHES_MESSAGE;
use arsenalcore::Session;
use iced::{
    widget::{button, column, container, pick_list, row, scrollable, text, Column},
    Alignment, Color, Element, Length,
};

const INSTRUCTIONS: [&str; 6] = [
    "Pick a missile type from the filter to narrow the list.",
    "Click a missile in the list to select it.",
    "Click anywhere on the map to place the selected missile.",
    "The circle around a marker shows its maximum range.",
    "Click a placed marker to remove it.",
    "Drag to pan, scroll to zoom.",
];

const MUTED: Color = Color::from_rgb(0.65, 0.67, 0.7);

pub fn view(session: &Session, width: Length) -> Element<'_, Message> {
    let layout = session.layout();

    let mut header = row![text("Indian Missile Arsenal").size(24).width(Length::Fill)]
        .align_y(Alignment::Center)
        .spacing(8);
    if layout.is_compact() {
        header = header.push(
            button(text("Close"))
                .on_press(Message::PanelToggled)
                .style(button::secondary),
        );
    }

    let filter = column![
        text("Filter by Type:").size(14),
        pick_list(
            session.filter_options(),
            Some(session.filter().clone()),
            Message::FilterChanged,
        )
        .width(Length::Fill),
    ]
    .spacing(4);

    let mut content = column![header, instructions(session), filter, record_list(session)]
        .spacing(14)
        .padding(16);

    content = content.push(details(session));

    if layout.clear_all_offered() {
        let clear = button(text("Clear All Markers"))
            .width(Length::Fill)
            .style(button::danger);
        let clear = if session.placements().is_empty() {
            clear
        } else {
            clear.on_press(Message::ClearAll)
        };
        content = content.push(clear);
    }

    content = content.push(activity(session));

    container(scrollable(content).height(Length::Fill))
        .width(width)
        .height(Length::Fill)
        .style(container::rounded_box)
        .into()
}

/// Thin bar that reopens the sidebar on compact layouts.
pub fn toggle_bar(session: &Session) -> Element<'_, Message> {
    let armed = match session.selected() {
        Some(record) => format!("Armed: {}", record.name),
        None => "No missile selected".to_string(),
    };
    container(
        row![
            button(text("Missiles")).on_press(Message::PanelToggled),
            text(armed).size(14).color(MUTED),
        ]
        .spacing(12)
        .align_y(Alignment::Center),
    )
    .padding(8)
    .width(Length::Fill)
    .into()
}

fn instructions(session: &Session) -> Element<'_, Message> {
    let open = session.layout().instructions_open();
    let toggle = button(text(if open { "How to use  [-]" } else { "How to use  [+]" }))
        .on_press(Message::InstructionsToggled)
        .style(button::text);
    if !open {
        return toggle.into();
    }

    let steps = INSTRUCTIONS
        .iter()
        .enumerate()
        .fold(Column::new().spacing(2), |steps, (index, step)| {
            steps.push(text(format!("{}. {}", index + 1, step)).size(12).color(MUTED))
        });
    column![toggle, steps].spacing(4).into()
}

fn record_list(session: &Session) -> Element<'_, Message> {
    let visible = session.visible();
    let title = text(format!("Missile Systems ({})", visible.len())).size(18);

    if visible.is_empty() {
        return column![title, text(NO_MATCHES_MESSAGE).size(13).color(MUTED)]
            .spacing(6)
            .into();
    }

    let rows = visible.into_iter().fold(Column::new().spacing(4), |rows, record| {
        rows.push(record_row(record, session.is_selected(record)))
    });
    column![title, rows].spacing(6).into()
}

fn record_row(record: &CatalogRecord, selected: bool) -> Element<'_, Message> {
    let accent = to_color(category_color(&record.category));
    let label = row![
        text("▍").color(accent).size(18),
        column![
            text(&record.name).size(15),
            text(format!("{} km · {}", record.range, record.category))
                .size(12)
                .color(MUTED),
        ]
        .spacing(2),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    button(label)
        .width(Length::Fill)
        .on_press(Message::RecordSelected(record.key()))
        .style(if selected {
            button::primary
        } else {
            button::secondary
        })
        .into()
}

fn details(session: &Session) -> Element<'_, Message> {
    let Some(record) = session.selected() else {
        return text("Select a missile from the list, then click on the map to place it.")
            .size(13)
            .color(MUTED)
            .into();
    };

    let mut lines = column![
        text(&record.name).size(20),
        text(format!("Type: {}", record.category)).size(13),
        text(format!("Range: {} km", record.range)).size(13),
    ]
    .spacing(4);
    for (label, value) in record.details() {
        lines = lines.push(text(format!("{label}: {value}")).size(13));
    }
    if record.has_coverage() {
        lines = lines.push(
            text("Click on the map to place this missile.")
                .size(12)
                .color(MUTED),
        );
    } else {
        lines = lines.push(
            text("No range circle is drawn for this system.")
                .size(12)
                .color(MUTED),
        );
    }

    container(lines)
        .padding(10)
        .width(Length::Fill)
        .style(container::bordered_box)
        .into()
}

fn activity(session: &Session) -> Element<'_, Message> {
    let metrics = session.metrics();
    let summary = text(format!(
        "{} on map · {} placed · {} removed · {} cleared",
        session.placements().len(),
        metrics.placed(),
        metrics.removed(),
        metrics.cleared()
    ))
    .size(12)
    .color(MUTED);

    let history = session
        .activity()
        .recent(5)
        .fold(Column::new().spacing(2), |history, line| {
            history.push(text(line).size(12))
        });

    column![text("Recent activity").size(16), summary, history]
        .spacing(4)
        .into()
}
