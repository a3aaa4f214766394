//! Payload inspector: the latest extracted payload as an indented tree.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use serde_json::{Map, Value};

use super::{helpers::status_color, helpers::truncate_string, theme};
use crate::state::State;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// `system` / `name` of a status-bearing object
    Heading(String),
    Status(String),
    Field { key: String, value: String },
    /// Key of a nested object or array; its contents follow one level deeper
    Section(String),
    /// Scalar element of an array
    Item(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorLine {
    pub depth: usize,
    pub row: Row,
}

/// Flatten a payload into display lines.
pub fn inspector_lines(value: &Value) -> Vec<InspectorLine> {
    let mut out = Vec::new();
    match value {
        Value::Object(map) => visit_object(map, 0, &mut out),
        Value::Array(items) => visit_array(items, 0, &mut out),
        scalar => push(&mut out, 0, Row::Item(scalar_text(scalar))),
    }
    out
}

fn push(out: &mut Vec<InspectorLine>, depth: usize, row: Row) {
    out.push(InspectorLine { depth, row });
}

fn visit_object(map: &Map<String, Value>, depth: usize, out: &mut Vec<InspectorLine>) {
    let heading_key = ["system", "name"].into_iter().find(|k| map.get(*k).is_some_and(Value::is_string));
    if let Some(key) = heading_key {
        push(out, depth, Row::Heading(scalar_text(&map[key])));
    }
    if let Some(status) = map.get("status").filter(|v| !v.is_object() && !v.is_array()) {
        push(out, depth, Row::Status(scalar_text(status).to_uppercase()));
    }
    for (key, value) in map {
        if Some(key.as_str()) == heading_key || (key == "status" && !value.is_object() && !value.is_array()) {
            continue;
        }
        match value {
            Value::Object(inner) => {
                push(out, depth, Row::Section(key.clone()));
                visit_object(inner, depth + 1, out);
            }
            Value::Array(items) => {
                push(out, depth, Row::Section(key.clone()));
                visit_array(items, depth + 1, out);
            }
            scalar => push(out, depth, Row::Field { key: key.clone(), value: scalar_text(scalar) }),
        }
    }
}

fn visit_array(items: &[Value], depth: usize, out: &mut Vec<InspectorLine>) {
    for item in items {
        match item {
            Value::Object(map) => visit_object(map, depth, out),
            Value::Array(inner) => visit_array(inner, depth + 1, out),
            scalar => push(out, depth, Row::Item(scalar_text(scalar))),
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn render_inspector(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_SURFACE);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(ratatui::widgets::BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .style(base_style)
        .title(Span::styled(" Telemetry ", Style::default().fg(theme::ACCENT).bold()));

    let content_area = block.inner(area);
    frame.render_widget(block, area);

    let width = content_area.width as usize;
    let text: Vec<Line> = match &state.payload {
        None => vec![Line::from(Span::styled(
            " No telemetry received",
            Style::default().fg(theme::TEXT_MUTED).italic(),
        ))],
        Some(payload) => inspector_lines(payload).into_iter().map(|line| render_line(line, width)).collect(),
    };

    frame.render_widget(Paragraph::new(text).style(base_style), content_area);
}

fn render_line(line: InspectorLine, width: usize) -> Line<'static> {
    let indent = " ".repeat(1 + line.depth * 2);
    let avail = width.saturating_sub(indent.len());
    let spans = match line.row {
        Row::Heading(name) => {
            vec![Span::styled(truncate_string(&format!("▣ {}", name), avail), Style::default().fg(theme::TEXT).bold())]
        }
        Row::Status(status) => vec![
            Span::styled("status ", Style::default().fg(theme::TEXT_MUTED)),
            Span::styled(status.clone(), Style::default().fg(status_color(&status)).bold()),
        ],
        Row::Field { key, value } => {
            let key_part = format!("{}: ", key);
            let rest = avail.saturating_sub(key_part.len());
            vec![
                Span::styled(key_part, Style::default().fg(theme::TEXT_MUTED)),
                Span::styled(truncate_string(&value, rest), Style::default().fg(theme::TEXT_SECONDARY)),
            ]
        }
        Row::Section(key) => vec![Span::styled(format!("{}:", key), Style::default().fg(theme::ACCENT_DIM))],
        Row::Item(value) => {
            vec![Span::styled(truncate_string(&format!("· {}", value), avail), Style::default().fg(theme::TEXT_SECONDARY))]
        }
    };
    let mut all = vec![Span::raw(indent)];
    all.extend(spans);
    Line::from(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn line(depth: usize, row: Row) -> InspectorLine {
        InspectorLine { depth, row }
    }

    fn field(key: &str, value: &str) -> Row {
        Row::Field { key: key.into(), value: value.into() }
    }

    #[test]
    fn single_system_payload() {
        let v = json!({"system": "POWER", "status": "critical", "parameters": {"voltage": 220}});
        assert_eq!(
            inspector_lines(&v),
            vec![
                line(0, Row::Heading("POWER".into())),
                line(0, Row::Status("CRITICAL".into())),
                line(0, Row::Section("parameters".into())),
                line(1, field("voltage", "220")),
            ]
        );
    }

    #[test]
    fn systems_list_indents_each_entry() {
        let v = json!({"systems": [
            {"system": "PROPULSION", "status": "DEGRADED"},
            {"name": "LIFE_SUPPORT", "status": "STABLE", "o2": 0.19}
        ]});
        assert_eq!(
            inspector_lines(&v),
            vec![
                line(0, Row::Section("systems".into())),
                line(1, Row::Heading("PROPULSION".into())),
                line(1, Row::Status("DEGRADED".into())),
                line(1, Row::Heading("LIFE_SUPPORT".into())),
                line(1, Row::Status("STABLE".into())),
                line(1, field("o2", "0.19")),
            ]
        );
    }

    #[test]
    fn system_preferred_over_name() {
        let v = json!({"system": "POWER", "name": "Main bus", "status": "OK"});
        let lines = inspector_lines(&v);
        assert_eq!(lines[0], line(0, Row::Heading("POWER".into())));
        assert!(lines.contains(&line(0, field("name", "Main bus"))));
    }

    #[test]
    fn scalar_arrays_and_nulls() {
        let v = json!({"alarms": ["fire", 3, null], "note": null, "ok": true});
        assert_eq!(
            inspector_lines(&v),
            vec![
                line(0, Row::Section("alarms".into())),
                line(1, Row::Item("fire".into())),
                line(1, Row::Item("3".into())),
                line(1, Row::Item("null".into())),
                line(0, field("note", "null")),
                line(0, field("ok", "true")),
            ]
        );
    }

    #[test]
    fn top_level_scalar() {
        assert_eq!(inspector_lines(&json!(42)), vec![line(0, Row::Item("42".into()))]);
    }
}
