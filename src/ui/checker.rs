//! Command checker form: input line, tier selector and result view.

use std::time::Instant;

use ratatui::prelude::{Buffer, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use crate::config::Tier;
use crate::event::CheckUpdate;
use crate::security::CommandAnalysis;

use super::input::InputLine;
use super::theme::Palette;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// What the result area currently shows.
#[derive(Debug, Clone)]
pub enum CheckStatus {
    Idle,
    Loading { started: Instant },
    Done {
        command: String,
        model: String,
        analysis: CommandAnalysis,
    },
    Failed(String),
}

pub struct TuiChecker {
    input: InputLine,
    tier: Tier,
    status: CheckStatus,
    /// Transient message in the status line (e.g. "Copied").
    notice: Option<String>,
    scroll: u16,
}

impl TuiChecker {
    pub fn new(tier: Tier) -> Self {
        Self {
            input: InputLine::new(),
            tier,
            status: CheckStatus::Idle,
            notice: None,
            scroll: 0,
        }
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputLine {
        self.notice = None;
        &mut self.input
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn toggle_tier(&mut self) {
        self.tier = self.tier.toggle();
    }

    pub fn status(&self) -> &CheckStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, CheckStatus::Loading { .. })
    }

    /// Clear the previous result and show the loading indicator.
    pub fn start_loading(&mut self) {
        self.status = CheckStatus::Loading {
            started: Instant::now(),
        };
        self.notice = None;
        self.scroll = 0;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.status = CheckStatus::Failed(message.into());
        self.scroll = 0;
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn handle_update(&mut self, update: CheckUpdate) {
        match update {
            CheckUpdate::Completed {
                command,
                model,
                analysis,
            } => {
                self.status = CheckStatus::Done {
                    command,
                    model,
                    analysis,
                };
            }
            CheckUpdate::Failed { message, .. } => {
                self.status = CheckStatus::Failed(message);
            }
        }
        self.scroll = 0;
    }

    /// Clear input and result.
    pub fn reset(&mut self) {
        self.input.clear();
        self.status = CheckStatus::Idle;
        self.notice = None;
        self.scroll = 0;
    }

    pub fn scroll(&mut self, delta: i32) {
        let next = i32::from(self.scroll) + delta;
        self.scroll = u16::try_from(next.max(0)).unwrap_or(u16::MAX);
    }

    /// Plain-text report of the current result, if any.
    pub fn report(&self) -> Option<String> {
        match &self.status {
            CheckStatus::Done {
                command, analysis, ..
            } => Some(analysis.to_report(command)),
            _ => None,
        }
    }

    pub fn render_input(&self, area: Rect, buf: &mut Buffer, palette: &Palette, focused: bool) {
        let border = if focused { palette.accent } else { palette.muted };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Command ");

        let line = if self.input.is_empty() {
            Line::from(Span::styled(
                "e.g. rm -rf ./build",
                Style::default().fg(palette.muted).add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(
                self.input.text().to_string(),
                Style::default().fg(palette.foreground),
            ))
        };

        Paragraph::new(line).block(block).render(area, buf);
    }

    pub fn render_status(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let mut spans = vec![Span::styled("Mode: ", Style::default().fg(palette.muted))];
        for tier in [Tier::Fast, Tier::Accurate] {
            let style = if tier == self.tier {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(palette.muted)
            };
            spans.push(Span::styled(format!(" {} ", tier.label()), style));
            spans.push(Span::raw(" "));
        }

        if let CheckStatus::Loading { started } = &self.status {
            let frame = (started.elapsed().as_millis() / 120) as usize % SPINNER.len();
            spans.push(Span::styled(
                format!(" {} Analyzing...", SPINNER[frame]),
                Style::default().fg(palette.accent),
            ));
        } else if let Some(notice) = &self.notice {
            spans.push(Span::styled(format!(" {}", notice), Style::default().fg(palette.muted)));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    pub fn render_result(&self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.muted))
            .title(" Analysis ");
        let inner_width = block.inner(area).width.max(1) as usize;

        let lines = match &self.status {
            CheckStatus::Idle => vec![Line::from(Span::styled(
                "Enter a shell command and press Enter to check how safe it is.",
                Style::default().fg(palette.muted),
            ))],
            CheckStatus::Loading { .. } => vec![Line::from(Span::styled(
                "Waiting for the model...",
                Style::default().fg(palette.muted),
            ))],
            CheckStatus::Failed(message) => vec![Line::from(Span::styled(
                message.clone(),
                Style::default().fg(palette.error),
            ))],
            CheckStatus::Done {
                command,
                model,
                analysis,
            } => analysis_lines(command, model, analysis, palette, inner_width),
        };

        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(palette.foreground))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}

/// Bulleted section with hanging indent.
fn bullet_lines<'a>(items: &[String], width: usize, style: Style) -> Vec<Line<'a>> {
    let options = textwrap::Options::new(width.saturating_sub(2).max(8))
        .initial_indent("• ")
        .subsequent_indent("  ");
    items
        .iter()
        .flat_map(|item| {
            textwrap::wrap(item, &options)
                .into_iter()
                .map(|chunk| Line::from(Span::styled(chunk.into_owned(), style)))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn section_title<'a>(title: &'static str, palette: &Palette) -> Line<'a> {
    Line::from(Span::styled(
        title,
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    ))
}

fn analysis_lines<'a>(
    command: &str,
    model: &str,
    analysis: &CommandAnalysis,
    palette: &Palette,
    width: usize,
) -> Vec<Line<'a>> {
    let text = Style::default().fg(palette.foreground);
    let badge = Style::default()
        .fg(palette.severity(analysis.safety_level.severity()))
        .add_modifier(Modifier::BOLD | Modifier::REVERSED);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("$ ", Style::default().fg(palette.muted)),
            Span::styled(command.to_string(), text.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled(format!(" {} ", analysis.safety_level), badge),
            Span::styled(format!("  via {}", model), Style::default().fg(palette.muted)),
        ]),
        Line::default(),
        section_title("What it does", palette),
    ];
    lines.extend(bullet_lines(&analysis.explanation_sentences(), width, text));

    lines.push(Line::default());
    lines.push(section_title("Risks", palette));
    if analysis.risks.is_empty() {
        lines.push(Line::from(Span::styled("  None reported.", Style::default().fg(palette.muted))));
    } else {
        lines.extend(bullet_lines(&analysis.risks, width, text));
    }

    lines.push(Line::default());
    lines.push(section_title("Recommendations", palette));
    if analysis.recommendations.is_empty() {
        lines.push(Line::from(Span::styled("  None reported.", Style::default().fg(palette.muted))));
    } else {
        lines.extend(bullet_lines(&analysis.recommendations, width, text));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CheckError, ParseError};
    use crate::security::SafetyLevel;

    fn analysis() -> CommandAnalysis {
        CommandAnalysis {
            explanation: "Removes a file.".to_string(),
            safety_level: SafetyLevel::new("Potentially Dangerous"),
            risks: vec!["Data loss".to_string()],
            recommendations: vec![],
        }
    }

    #[test]
    fn test_loading_clears_previous_result() {
        let mut checker = TuiChecker::new(Tier::Fast);
        checker.handle_update(CheckUpdate::Completed {
            command: "rm a".to_string(),
            model: "m".to_string(),
            analysis: analysis(),
        });
        assert!(checker.report().is_some());

        checker.start_loading();
        assert!(checker.is_loading());
        assert!(checker.report().is_none());
    }

    #[test]
    fn test_failure_shows_no_analysis() {
        let mut checker = TuiChecker::new(Tier::Fast);
        checker.start_loading();
        let error = CheckError::from(ParseError::NoJsonObject);
        checker.handle_update(CheckUpdate::Failed {
            message: error.user_message(),
            error,
        });

        match checker.status() {
            CheckStatus::Failed(message) => assert!(message.contains("no JSON object found")),
            other => panic!("unexpected status: {:?}", other),
        }
        assert!(checker.report().is_none());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut checker = TuiChecker::new(Tier::Accurate);
        checker.input_mut().insert_char('x');
        checker.show_error("boom");
        checker.reset();

        assert!(checker.input().is_empty());
        assert!(matches!(checker.status(), CheckStatus::Idle));
        assert_eq!(checker.tier(), Tier::Accurate);
    }

    #[test]
    fn test_scroll_saturates_at_zero() {
        let mut checker = TuiChecker::new(Tier::Fast);
        checker.scroll(-5);
        checker.scroll(3);
        checker.scroll(-1);
        assert_eq!(checker.scroll, 2);
    }

    #[test]
    fn test_bullet_lines_wrap() {
        let items = vec!["one two three four five six seven eight nine ten".to_string()];
        let lines = bullet_lines(&items, 20, Style::default());
        assert!(lines.len() > 1);
    }
}
