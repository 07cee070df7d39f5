//! Fixed-layout PDF rendering of plain-text paragraphs.

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};

/// A4 in points.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 40.0;
pub const LINE_HEIGHT: f32 = 14.0;
pub const FONT_SIZE: f32 = 12.0;

const CATALOG_ID: i32 = 1;
const PAGE_TREE_ID: i32 = 2;
const FONT_ID: i32 = 3;
const FIRST_PAGE_ID: i32 = 4;
const FONT_NAME: Name<'static> = Name(b"F1");

/// One line of text placed at baseline position (`x`, `y`).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Place paragraphs top to bottom, one line each.
///
/// Blank paragraphs move the cursor without drawing anything. A new page
/// starts when a line would be drawn below the bottom margin. The result
/// always holds at least one page.
pub fn layout(paragraphs: &[String]) -> Vec<Vec<PlacedLine>> {
    let top = PAGE_HEIGHT - MARGIN;
    let mut pages = Vec::new();
    let mut page = Vec::new();
    let mut y = top;

    for text in paragraphs {
        if text.is_empty() {
            y -= LINE_HEIGHT;
            continue;
        }
        if y < MARGIN {
            pages.push(std::mem::take(&mut page));
            y = top;
        }
        page.push(PlacedLine { x: MARGIN, y, text: text.clone() });
        y -= LINE_HEIGHT;
    }

    pages.push(page);
    pages
}

/// Serialize laid-out pages into a PDF document using Helvetica.
pub fn render(pages: &[Vec<PlacedLine>]) -> Vec<u8> {
    let page_ids: Vec<Ref> = (0..pages.len())
        .map(|i| Ref::new(FIRST_PAGE_ID + 2 * i as i32))
        .collect();

    let page_tree_id = Ref::new(PAGE_TREE_ID);
    let font_id = Ref::new(FONT_ID);

    let mut pdf = Pdf::new();
    pdf.catalog(Ref::new(CATALOG_ID)).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);
    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (i, lines) in pages.iter().enumerate() {
        let content_id = Ref::new(FIRST_PAGE_ID + 2 * i as i32 + 1);

        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().fonts().pair(FONT_NAME, font_id);
        page.finish();

        let mut content = Content::new();
        for line in lines {
            content.begin_text();
            content.set_font(FONT_NAME, FONT_SIZE);
            content.next_line(line.x, line.y);
            content.show(Str(&win_ansi(&line.text)));
            content.end_text();
        }
        pdf.stream(content_id, &content.finish());
    }

    pdf.finish()
}

/// Encode text for a WinAnsi-encoded base-14 font. Unmappable characters become `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => b' ',
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}
