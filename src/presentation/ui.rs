use crate::application::{App, AppMode, EditTarget};
use crate::domain::{CategoryKind, ItemStatus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

const BRAND: Color = Color::Red;
const HEADER_HEIGHT: u16 = 1;
const TABS_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const PLATE_PLACEHOLDER: &str = "EX: ABC-1234";
const OPERATOR_PLACEHOLDER: &str = "Digite o seu nome";
const NOTE_PLACEHOLDER: &str = "Observação (se houver)...";

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(TABS_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    if app.mode == AppMode::Submitted {
        render_success(f, chunks[1].union(chunks[2]));
    } else {
        render_tabs(f, app, chunks[1]);
        match app.current_category().kind {
            CategoryKind::Identification => render_identification(f, app, chunks[2]),
            CategoryKind::Equipment => render_items(f, app, chunks[2]),
            CategoryKind::Review => render_review(f, app, chunks[2]),
        }
    }

    render_status_bar(f, app, chunks[3]);

    match app.mode {
        AppMode::Alert => render_alert_popup(f, app.alert_message.as_deref().unwrap_or_default()),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        _ => {}
    }
}

/// Item rows that fit on a terminal `height` rows tall.
pub fn item_viewport_rows(height: u16) -> usize {
    // Table borders and its header row.
    height.saturating_sub(HEADER_HEIGHT + TABS_HEIGHT + FOOTER_HEIGHT + 3).max(1) as usize
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(" SAMU ", Style::default().bg(BRAND).fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled(" Checklist de Viatura", Style::default().fg(Color::Cyan)),
    ]));
    f.render_widget(title, halves[0]);

    let step = Paragraph::new(format!("{} / {} ", app.current_step + 1, app.step_count()))
        .alignment(Alignment::Right)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(step, halves[1]);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let plate_missing = app.record.vehicle_plate.is_empty();
    let titles: Vec<Line> = app
        .catalog
        .categories()
        .iter()
        .enumerate()
        .map(|(idx, category)| {
            let style = if idx != 0 && plate_missing {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::styled(format!("{} {} {}", idx + 1, category.icon.glyph(), category.label), style)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.current_step)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(BRAND).add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .divider("|");
    f.render_widget(tabs, area);
}

fn field_lines(label: &str, value: &str, placeholder: &str, selected: bool) -> Vec<Line<'static>> {
    let marker = if selected { "▶ " } else { "  " };
    let value_span = if value.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(value.to_string(), Style::default().add_modifier(Modifier::BOLD))
    };
    let label_style = if selected {
        Style::default().fg(BRAND).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    vec![
        Line::from(Span::styled(format!("{marker}{}", label.to_uppercase()), label_style)),
        Line::from(vec![Span::raw("    "), value_span]),
        Line::from(""),
    ]
}

fn render_identification(f: &mut Frame, app: &App, area: Rect) {
    let editing = |target: EditTarget| app.mode == AppMode::Editing(target);
    let plate = if editing(EditTarget::VehiclePlate) { &app.input } else { &app.record.vehicle_plate };
    let operator = if editing(EditTarget::OperatorName) { &app.input } else { &app.record.operator_name };

    let mut lines = vec![
        Line::from(Span::styled(
            "DADOS OBRIGATÓRIOS DO PLANTÃO",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];
    lines.extend(field_lines("Ambulância / Placa", plate, PLATE_PLACEHOLDER, app.selected_row == 0));
    lines.extend(field_lines(
        "Responsável pela Verificação",
        operator,
        OPERATOR_PLACEHOLDER,
        app.selected_row == 1,
    ));

    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Identificação"));
    f.render_widget(form, area);
}

fn status_toggle(status: ItemStatus) -> Line<'static> {
    let off = Style::default().fg(Color::DarkGray);
    let (c_style, nc_style) = match status {
        ItemStatus::Conforming => (Style::default().bg(Color::Green).fg(Color::White), off),
        ItemStatus::NonConforming => (off, Style::default().bg(Color::Red).fg(Color::White)),
    };
    Line::from(vec![Span::styled(" C ", c_style), Span::raw(" "), Span::styled(" NC ", nc_style)])
}

fn render_items(f: &mut Frame, app: &App, area: Rect) {
    let category = app.current_category();
    let items = app.visible_items();
    let visible_rows = (area.height as usize).saturating_sub(3);

    let header = Row::new(vec![
        Cell::from("Item").style(Style::default().fg(Color::Yellow)),
        Cell::from("Status").style(Style::default().fg(Color::Yellow)),
        Cell::from("Observação").style(Style::default().fg(Color::Yellow)),
    ]);

    let mut rows = vec![header];
    for (idx, item) in items.iter().enumerate().skip(app.scroll_row).take(visible_rows) {
        let Some(response) = app.record.response(item.id) else {
            continue;
        };
        let selected = idx == app.selected_row;
        let non_conforming = response.status == ItemStatus::NonConforming;

        let label_style = if selected {
            Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let note = if app.mode == AppMode::Editing(EditTarget::Note(item.id)) {
            Cell::from(app.input.clone()).style(Style::default().fg(Color::Green))
        } else if response.note.is_empty() {
            Cell::from(NOTE_PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else if non_conforming {
            Cell::from(response.note.clone()).style(Style::default().fg(Color::LightRed))
        } else {
            Cell::from(response.note.clone())
        };

        rows.push(Row::new(vec![
            Cell::from(item.label).style(label_style),
            Cell::from(status_toggle(response.status)),
            note,
        ]));
    }

    let widths = [Constraint::Length(26), Constraint::Length(9), Constraint::Min(10)];
    let table = Table::new(rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} {}", category.icon.glyph(), category.label.to_uppercase())),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_review(f: &mut Frame, app: &App, area: Rect) {
    let summary = app.review_summary();
    let muted = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("VIATURA      ", muted),
            Span::styled(app.record.vehicle_plate.clone(), Style::default().fg(BRAND).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("RESPONSÁVEL  ", muted),
            Span::styled(app.record.operator_name.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(Span::styled("ITENS NÃO CONFORMES (NC):", muted)),
    ];

    if summary.all_conforming() {
        lines.push(Line::from(Span::styled(
            "✔ Excelente! Todos os itens estão em conformidade.",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    } else {
        for entry in &summary.non_conforming {
            let mut spans = vec![Span::styled(
                format!("  • {}", entry.item.label),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )];
            if !entry.note.is_empty() {
                spans.push(Span::styled(
                    format!("  \"{}\"", entry.note),
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::ITALIC),
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::from(""));

    if !app.endpoint_configured {
        lines.push(Line::from(Span::styled(
            "⚠ URL da planilha não configurada: o envio será recusado.",
            Style::default().fg(Color::Yellow),
        )));
    }

    if let Some(error) = &app.submit_error {
        lines.push(Line::from(Span::styled(
            format!(" ⚠ {error} (Esc para fechar) "),
            Style::default().bg(Color::Red).fg(Color::White).add_modifier(Modifier::BOLD),
        )));
    }

    lines.push(Line::from(""));
    let button = if app.loading { " A GRAVAR... " } else { " ➤ GRAVAR NA PLANILHA (Enter) " };
    lines.push(
        Line::from(Span::styled(
            button,
            Style::default().bg(Color::White).fg(Color::Black).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    );

    let review = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Revisão Final"))
        .wrap(Wrap { trim: false });
    f.render_widget(review, area);
}

fn render_success(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("✔", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled("REGISTRO CONCLUÍDO!", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            "Os dados foram enviados para a planilha com sucesso.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " NOVA VERIFICAÇÃO (Enter) ",
            Style::default().bg(BRAND).fg(Color::White).add_modifier(Modifier::BOLD),
        )),
    ];

    let success = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(success, area);
}

fn navigation_hints(app: &App) -> String {
    let mut hints = Vec::new();
    if !app.is_first_step() {
        hints.push("PgUp/p: VOLTAR");
    }
    if !app.is_last_step() {
        hints.push("PgDn/n: PRÓXIMO");
    }
    hints.push(match app.current_category().kind {
        CategoryKind::Identification => "↑↓: campo | Enter: editar",
        CategoryKind::Equipment => "↑↓: item | Espaço/c/x: C/NC | Enter: observação",
        CategoryKind::Review => "Enter/s: gravar",
    });
    hints.push("1-6: abas | ?: ajuda | q: sair");
    hints.join(" | ")
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (title, text, style) = match app.mode {
        AppMode::Normal if app.loading => (
            "Status",
            "A gravar na planilha...".to_string(),
            Style::default().fg(Color::Yellow),
        ),
        AppMode::Normal => ("Status", navigation_hints(app), Style::default()),
        AppMode::Editing(target) => {
            let label = match target {
                EditTarget::VehiclePlate => "Placa",
                EditTarget::OperatorName => "Responsável",
                EditTarget::Note(_) => "Observação",
            };
            let prefix = format!("{label}: ");
            let before_cursor: String = app.input.chars().take(app.cursor_position).collect();
            let cursor_x = area.x + 1 + (Span::raw(prefix.as_str()).width() + Span::raw(before_cursor.as_str()).width()) as u16;
            f.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
            (
                "Editando (Enter para salvar, Esc para cancelar)",
                format!("{prefix}{}", app.input),
                Style::default().fg(Color::Green),
            )
        }
        AppMode::Alert => ("Atenção", "Enter: OK".to_string(), Style::default().fg(BRAND)),
        AppMode::Help => (
            "Ajuda",
            "↑↓/jk: rolar | PgUp/PgDn: rolar rápido | Home: topo | Esc/q: fechar".to_string(),
            Style::default().fg(Color::Cyan),
        ),
        AppMode::Submitted => (
            "Status",
            "Enter/r: nova verificação | q: sair".to_string(),
            Style::default().fg(Color::Green),
        ),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(style);
    f.render_widget(status, area);
}

fn centered_rect(area: Rect, width_percent: u16, height: u16) -> Rect {
    let width = area.width * width_percent / 100;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_alert_popup(f: &mut Frame, message: &str) {
    let popup_area = centered_rect(f.area(), 60, 7);
    f.render_widget(Clear, popup_area);

    let alert = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("[ OK ]", Style::default().add_modifier(Modifier::BOLD))).alignment(Alignment::Center),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Atenção")
            .style(Style::default().fg(BRAND)),
    );
    f.render_widget(alert, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("Ajuda do Checklist (Linha {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"CHECKLIST DE VIATURA

=== ETAPAS ===
1 Início        Placa da ambulância e nome do responsável
2-5 Categorias  Insumos, Imobilização, Equipamentos, Conforto
6 Finalizar     Revisão dos itens NC e envio para a planilha

A placa e o responsável são obrigatórios para avançar.
As abas 2-6 só ficam disponíveis depois de informar a placa.

=== NAVEGAÇÃO ===
Tab / PgDn / n  Próxima etapa
Shift+Tab / PgUp / p  Etapa anterior
1-6             Ir direto para a aba
↑↓ ou j/k       Mover entre campos ou itens

=== IDENTIFICAÇÃO ===
Enter / F2      Editar o campo selecionado
                A placa é convertida para maiúsculas

=== ITENS ===
Espaço          Alternar C / NC
c ou ←          Marcar como Conforme (C)
x ou →          Marcar como Não Conforme (NC)
Enter / F2      Editar observação

=== EDIÇÃO DE TEXTO ===
Enter           Salvar
Esc             Cancelar
←→ Home End     Mover cursor
Backspace/Del   Apagar

=== FINALIZAR ===
Enter / s       Gravar na planilha
Esc             Fechar mensagem de erro
                Em caso de falha os dados são mantidos e o envio
                pode ser repetido.

=== GERAL ===
F1 ou ?         Mostrar esta ajuda
q               Sair (fora da edição)
Ctrl+C          Sair imediatamente"#
}
