use std::collections::HashMap;
use std::fs::{self, File};
use std::path::PathBuf;

use image::{Rgb, RgbImage};
use rusttype::{Font, Scale, point};
use tracing::debug;

use crate::board::{BoardLayout, Cell};
use crate::error::BingoError;

const FONT_CANDIDATES: &[&str] = &[
    "Arial", "Helvetica", "DejaVuSans", "LiberationSans", "SegoeUI", "Segoe UI", "NotoSans-Regular", "NotoSans", "Cantarell-Regular"
];

const CELL_PX: u32 = 128;
const PADDING: u32 = 20;
const INNER_MARGIN: u32 = 10;

const BACKGROUND: Rgb<u8> = Rgb([245, 245, 245]);
const GRID: Rgb<u8> = Rgb([30, 30, 30]);
const TEXT: Rgb<u8> = Rgb([20, 20, 20]);
const TAG: Rgb<u8> = Rgb([90, 90, 90]);
const FREE_FILL: Rgb<u8> = Rgb([255, 226, 140]);

// Cell tints, assigned to participants in order of first appearance.
const PARTICIPANT_TINTS: &[Rgb<u8>] = &[
    Rgb([226, 236, 250]),
    Rgb([250, 230, 226]),
    Rgb([228, 246, 230]),
    Rgb([244, 232, 250]),
    Rgb([250, 244, 222]),
    Rgb([224, 246, 246]),
    Rgb([238, 238, 238]),
];

fn font_search_dirs() -> Vec<PathBuf> {
    let home = dirs_next::home_dir();
    let mut dirs = Vec::new();
    if cfg!(target_os = "macos") {
        dirs.push(PathBuf::from("/System/Library/Fonts"));
        dirs.push(PathBuf::from("/Library/Fonts"));
        dirs.extend(home.map(|h| h.join("Library/Fonts")));
    } else if cfg!(target_os = "windows") {
        dirs.extend(std::env::var_os("WINDIR").map(|w| PathBuf::from(w).join("Fonts")));
        dirs.push(PathBuf::from("C:/Windows/Fonts"));
    } else {
        dirs.push(PathBuf::from("/usr/share/fonts"));
        dirs.push(PathBuf::from("/usr/local/share/fonts"));
        if let Some(home) = home {
            dirs.push(home.join(".fonts"));
            dirs.push(home.join(".local/share/fonts"));
        }
    }
    dirs
}

fn collect_font_files() -> Vec<PathBuf> {
    font_search_dirs()
        .into_iter()
        .filter(|dir| dir.exists())
        .flat_map(|dir| walkdir::WalkDir::new(dir).follow_links(true).into_iter().filter_map(Result::ok))
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "ttf" | "otf"))
        })
        .collect()
}

fn ascii_coverage(font: &Font<'_>) -> usize {
    (32u8..=126u8).filter(|&b| font.glyph(b as char).id().0 != 0).count()
}

/// Locates usable font bytes: `BINGO_FONT_PATH`, then a preferred family,
/// then whichever installed font covers the most printable ASCII.
pub fn find_system_font_data() -> Option<Vec<u8>> {
    if let Ok(path) = std::env::var("BINGO_FONT_PATH") {
        if let Ok(bytes) = fs::read(&path) {
            return Some(bytes);
        }
    }

    let files = collect_font_files();
    debug!("Found {} candidate font files", files.len());

    let preferred = FONT_CANDIDATES.iter().find_map(|cand| {
        files.iter().find(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| s.eq_ignore_ascii_case(cand))
        })
    });
    if let Some(bytes) = preferred.and_then(|p| fs::read(p).ok()) {
        return Some(bytes);
    }

    files
        .iter()
        .filter_map(|path| {
            let bytes = fs::read(path).ok()?;
            let score = ascii_coverage(&Font::try_from_vec(bytes.clone())?);
            Some((score, bytes))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, bytes)| bytes)
}

/// Maps each participant id to a tint, in order of first appearance.
fn participant_tints(cells: &[Cell]) -> HashMap<&str, Rgb<u8>> {
    let mut tints = HashMap::new();
    for cell in cells {
        if let Cell::Prompt(prompt) = cell {
            let next = PARTICIPANT_TINTS[tints.len() % PARTICIPANT_TINTS.len()];
            tints.entry(prompt.id.as_str()).or_insert(next);
        }
    }
    tints
}

struct TextPainter {
    font: Font<'static>,
    scale: Scale,
    line_height: f32,
}

impl TextPainter {
    fn new(font: Font<'static>, px: f32) -> Self {
        let scale = Scale::uniform(px);
        let v = font.v_metrics(scale);
        let line_height = (v.ascent - v.descent + v.line_gap).ceil();
        Self { font, scale, line_height }
    }

    fn text_width(&self, text: &str) -> f32 {
        self.font
            .layout(text, self.scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    /// Greedy word wrap at `max_w`.
    fn wrap(&self, text: &str, max_w: f32) -> Vec<String> {
        let space = self.text_width(" ");
        let mut lines = Vec::new();
        let mut line = String::new();
        let mut width = 0.0f32;
        for word in text.split_whitespace() {
            let word_w = self.text_width(word);
            if !line.is_empty() && width + space + word_w > max_w {
                lines.push(std::mem::take(&mut line));
                width = 0.0;
            }
            if !line.is_empty() {
                line.push(' ');
                width += space;
            }
            line.push_str(word);
            width += word_w;
        }
        if !line.is_empty() {
            lines.push(line);
        }
        lines
    }

    fn draw_wrapped(&self, img: &mut RgbImage, text: &str, left: u32, top: u32, max_w: u32, max_h: u32, color: Rgb<u8>) {
        let ascent = self.font.v_metrics(self.scale).ascent;
        // lines past max_h are dropped
        let fitting = (max_h as f32 / self.line_height).floor() as usize;
        for (row, line) in self.wrap(text, max_w as f32).iter().take(fitting).enumerate() {
            let baseline = row as f32 * self.line_height + ascent;
            self.draw_line(img, line, left, top, baseline, color);
        }
    }

    fn draw_line(&self, img: &mut RgbImage, text: &str, left: u32, top: u32, baseline_y: f32, color: Rgb<u8>) {
        for glyph in self.font.layout(text, self.scale, point(0.0, baseline_y)) {
            let Some(bb) = glyph.pixel_bounding_box() else { continue };
            glyph.draw(|x, y, coverage| {
                if coverage < 0.05 {
                    return;
                }
                let gx = left as i32 + x as i32 + bb.min.x;
                let gy = top as i32 + y as i32 + bb.min.y;
                if gx < 0 || gy < 0 || gx as u32 >= img.width() || gy as u32 >= img.height() {
                    return;
                }
                let dst = img.get_pixel_mut(gx as u32, gy as u32);
                for i in 0..3 {
                    dst[i] = (dst[i] as f32 * (1.0 - coverage) + color[i] as f32 * coverage) as u8;
                }
            });
        }
    }
}

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb<u8>) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, color);
        }
    }
}

/// Renders a laid-out board to PNG at `path`.
pub fn render_board_to_png(cells: &[Cell], layout: BoardLayout, path: &str) -> Result<(), BingoError> {
    if cells.len() != layout.cells() {
        return Err(BingoError::InvalidBoardSize(cells.len()));
    }

    let font_data = find_system_font_data().ok_or_else(|| BingoError::Font("No system font found for rendering".into()))?;
    let font = Font::try_from_vec(font_data).ok_or_else(|| BingoError::Font("Invalid font data".into()))?;
    let body = TextPainter::new(font.clone(), 18.0);
    let tag = TextPainter::new(font, 12.0);

    let side = layout.side() as u32;
    let grid = side * CELL_PX;
    let mut img = RgbImage::from_pixel(grid + PADDING * 2, grid + PADDING * 2, BACKGROUND);
    let tints = participant_tints(cells);

    for (idx, cell) in cells.iter().enumerate() {
        let col = idx as u32 % side;
        let row = idx as u32 / side;
        let x0 = PADDING + col * CELL_PX;
        let y0 = PADDING + row * CELL_PX;
        let inner = CELL_PX - INNER_MARGIN * 2;

        match cell {
            Cell::Free => {
                fill_rect(&mut img, x0, y0, CELL_PX, CELL_PX, FREE_FILL);
                let label_x = x0 + (CELL_PX - body.text_width("FREE") as u32) / 2;
                body.draw_wrapped(&mut img, "FREE", label_x, y0 + CELL_PX / 2 - 10, inner, inner, TEXT);
            }
            Cell::Prompt(prompt) => {
                let tint = tints.get(prompt.id.as_str()).copied().unwrap_or(BACKGROUND);
                fill_rect(&mut img, x0, y0, CELL_PX, CELL_PX, tint);
                let tag_h = tag.line_height as u32;
                body.draw_wrapped(&mut img, &prompt.text, x0 + INNER_MARGIN, y0 + INNER_MARGIN, inner, inner - tag_h, TEXT);
                tag.draw_wrapped(&mut img, &prompt.id, x0 + INNER_MARGIN, y0 + CELL_PX - INNER_MARGIN - tag_h, inner, tag_h, TAG);
            }
        }
    }

    for i in 0..=side {
        let offset = PADDING + i * CELL_PX;
        for along in PADDING..=PADDING + grid {
            img.put_pixel(along, offset, GRID);
            img.put_pixel(offset, along, GRID);
        }
    }

    let mut file = File::create(path)?;
    img.write_to(&mut file, image::ImageFormat::Png)?;
    Ok(())
}
