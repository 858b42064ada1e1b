use std::io::Stdout;
use std::thread::sleep;
use std::time::{Duration, Instant};

use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Terminal;
use tracing::{debug, info, warn};
use vn_engine::audio::{Looping, PcmChannel};
use vn_engine::video::{Plane, TileAttr};
use vn_engine::{Buttons, FramePump, InputLatch, JoyPort, Palette, Sound, TileMap, TileSet, Video};

pub const COLS: usize = 40;
pub const ROWS: usize = 28;

const KEYS: [(KeyCode, Buttons); 8] = [
    (KeyCode::Up, Buttons::UP),
    (KeyCode::Char('k'), Buttons::UP),
    (KeyCode::Down, Buttons::DOWN),
    (KeyCode::Char('j'), Buttons::DOWN),
    (KeyCode::Enter, Buttons::A),
    (KeyCode::Char('z'), Buttons::A),
    (KeyCode::Char('x'), Buttons::B),
    (KeyCode::Char('c'), Buttons::C),
];

#[derive(Debug, Copy, Clone)]
struct Cell {
    ch: char,
    /// Covered by the dialogue window.
    window: bool,
    /// Palette of the image underneath. Its color is looked up when drawn,
    /// so a palette set after the tile map still applies.
    image: Option<u8>,
}

impl Cell {
    const EMPTY: Cell = Cell { ch: ' ', window: false, image: None };
}

/// A 40×28 cell console drawn with ratatui. Images show up as blocks of
/// their palette's first opaque color.
pub struct TerminalConsole<B: Backend = CrosstermBackend<Stdout>> {
    terminal: Terminal<B>,
    cells: [[Cell; COLS]; ROWS],
    palettes: [Palette; 4],
    dirty: bool,

    frame_time: Duration,
    last_frame: Instant,
    frames: u64,

    hold_frames: u16,
    /// Frames each pressed button stays down, indexed like [`KEYS`].
    held_for: [u16; KEYS.len()],
    state: Buttons,
}

impl<B: Backend> TerminalConsole<B> {
    pub fn new(terminal: Terminal<B>, fps: u32, hold_frames: u16) -> Self {
        Self {
            terminal,
            cells: [[Cell::EMPTY; COLS]; ROWS],
            palettes: [Palette::default(); 4],
            dirty: true,
            frame_time: Duration::from_secs(1) / fps.max(1),
            last_frame: Instant::now(),
            frames: 0,
            hold_frames: hold_frames.max(1),
            held_for: [0; KEYS.len()],
            state: Buttons::empty(),
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn cells_mut(&mut self, x: u16, y: u16, w: u16, h: u16) -> impl Iterator<Item = &mut Cell> {
        let (x, y) = (x as usize, y as usize);
        let (x_end, y_end) = ((x + w as usize).min(COLS), (y + h as usize).min(ROWS));
        self.cells
            .iter_mut()
            .take(y_end)
            .skip(y)
            .flat_map(move |row| row.iter_mut().take(x_end).skip(x))
    }

    fn release_keys(&mut self) {
        for held in &mut self.held_for {
            *held = held.saturating_sub(1);
        }
    }

    /// Holds every button bound to `code` for the next `hold_frames` frames.
    fn press(&mut self, code: KeyCode) {
        for (i, (key, _)) in KEYS.iter().enumerate() {
            if *key == code {
                self.held_for[i] = self.hold_frames;
            }
        }
    }

    fn poll_keys(&mut self) {
        while let Ok(true) = event::poll(Duration::from_millis(0)) {
            let Ok(Event::Key(key)) = event::read() else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                self.quit();
            }
            self.press(key.code);
        }
    }

    /// Sends the held buttons to the latch as a port 1 event, if they changed.
    fn update_pad(&mut self, latch: &mut InputLatch) {
        let state = KEYS
            .iter()
            .zip(self.held_for)
            .filter(|(_, held)| *held > 0)
            .fold(Buttons::empty(), |state, ((_, button), _)| state | *button);

        if state != self.state {
            debug!("pad {:?}", state);
            latch.on_joy_event(JoyPort::Joy1, state ^ self.state, state);
            self.state = state;
        }
    }

    /// Scenes block until the player acts, so quitting ends the process.
    fn quit(&mut self) -> ! {
        ratatui::restore();
        info!("quit after {} frames", self.frames);
        std::process::exit(0);
    }

    fn render(&mut self) {
        let lines: Vec<Line> = self
            .cells
            .iter()
            .map(|row| {
                Line::from(
                    row.iter()
                        .map(|cell| Span::styled(cell.ch.to_string(), self.style(cell)))
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let result = self.terminal.draw(|frame| {
            let block = Block::bordered()
                .title(" vnplay ")
                .title_bottom(" ↑/↓ move · enter/z/x/c confirm · q quit ");
            frame.render_widget(Paragraph::new(lines).block(block), frame.area());
        });
        if let Err(e) = result {
            warn!("failed to draw frame: {e}");
        }
        self.dirty = false;
    }

    fn style(&self, cell: &Cell) -> Style {
        match (cell.window, cell.image) {
            (true, _) => Style::new().bg(Color::Black).fg(Color::White),
            (false, Some(palette)) => {
                let color = to_rgb(self.palettes[palette as usize & 3].0[1]);
                Style::new().bg(color).fg(Color::White)
            }
            (false, None) => Style::new(),
        }
    }
}

/// 0BGR 3-bit-per-channel color to RGB.
fn to_rgb(color: u16) -> Color {
    let channel = |shift: u16| (((color >> shift) & 0x0E) as u8) * 18;
    Color::Rgb(channel(0), channel(4), channel(8))
}

impl<B: Backend> FramePump for TerminalConsole<B> {
    fn advance_frame(&mut self, latch: &mut InputLatch) {
        if self.dirty {
            self.render();
        }

        let next = self.last_frame + self.frame_time;
        let now = Instant::now();
        if next > now {
            sleep(next - now);
        }
        self.last_frame = Instant::now();
        self.frames += 1;

        self.release_keys();
        self.poll_keys();
        self.update_pad(latch);
    }
}

impl<B: Backend> Video for TerminalConsole<B> {
    fn load_tiles(&mut self, tileset: &TileSet, slot: u16) {
        debug!("load {} tiles at {}", tileset.num_tiles, slot);
    }

    fn set_tile_map(&mut self, plane: Plane, attr: TileAttr, tilemap: &TileMap, x: u16, y: u16) {
        if plane != Plane::B {
            warn!("images are only drawn on plane B");
            return;
        }
        let palette = attr.palette();
        for cell in self.cells_mut(x, y, tilemap.w, tilemap.h) {
            cell.image = Some(palette);
        }
        self.dirty = true;
    }

    fn set_palette(&mut self, index: u8, palette: &Palette) {
        self.palettes[index as usize & 3] = *palette;
        self.dirty = true;
    }

    fn load_font(&mut self, tileset: &TileSet) {
        debug!("font with {} glyphs", tileset.num_tiles);
    }

    fn draw_text(&mut self, text: &str, x: u16, y: u16) {
        let width = text.chars().count() as u16;
        for (cell, ch) in self.cells_mut(x, y, width, 1).zip(text.chars()) {
            cell.ch = ch;
        }
        self.dirty = true;
    }

    fn clear_rect(&mut self, plane: Plane, _attr: TileAttr, x: u16, y: u16, w: u16, h: u16) {
        let window = plane == Plane::A;
        for cell in self.cells_mut(x, y, w, h) {
            cell.ch = ' ';
            cell.window = window;
        }
        self.dirty = true;
    }
}

impl<B: Backend> Sound for TerminalConsole<B> {
    fn start_music(&mut self, track: &[u8], looping: Looping) {
        info!("music: {} bytes, {:?}", track.len(), looping);
    }

    fn stop_pcm(&mut self, channel: PcmChannel) {
        debug!("stop pcm {:?}", channel);
    }

    fn play_pcm(&mut self, channel: PcmChannel, id: u8, samples: &[u8], priority: u8) {
        info!("sound #{id}: {} samples on {:?}, priority {priority}", samples.len(), channel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use vn_engine::video::{self, ImageCursor};
    use vn_engine::Image;

    fn console(hold_frames: u16) -> TerminalConsole<TestBackend> {
        // two extra cells each way for the border
        let terminal = Terminal::new(TestBackend::new(COLS as u16 + 2, ROWS as u16 + 2)).unwrap();
        TerminalConsole::new(terminal, 60, hold_frames)
    }

    fn plate(w: u16, h: u16, color: u16) -> Image<'static> {
        let mut colors = [0u16; 16];
        colors[1] = color;
        Image {
            tileset: TileSet { num_tiles: w * h, tiles: &[] },
            tilemap: TileMap { w, h, tiles: &[] },
            palette: Palette(colors),
        }
    }

    fn bg(console: &TerminalConsole<TestBackend>, x: usize, y: usize) -> Option<Color> {
        console.style(&console.cells[y][x]).bg
    }

    fn row(console: &TerminalConsole<TestBackend>, y: usize) -> String {
        console.cells[y].iter().map(|cell| cell.ch).collect()
    }

    #[test]
    fn image_takes_palette_set_after_its_map() {
        let mut console = console(6);
        video::show_image(&mut console, &mut ImageCursor::new(256), &plate(4, 3, 0x0A62), 1, 0, 0);

        assert_eq!(console.cells[0][0].image, Some(1));
        assert_eq!(bg(&console, 0, 0), Some(Color::Rgb(36, 108, 180)));
        assert_eq!(bg(&console, 3, 2), Some(Color::Rgb(36, 108, 180)));
        assert_eq!(bg(&console, 4, 0), None);

        console.render();
        let buffer = console.terminal.backend().buffer();
        assert_eq!(buffer[(1u16, 1u16)].bg, Color::Rgb(36, 108, 180));
        assert!(!console.dirty);
    }

    #[test]
    fn new_palette_recolors_drawn_images() {
        let mut console = console(6);
        video::show_image(&mut console, &mut ImageCursor::new(256), &plate(2, 2, 0x0A62), 2, 5, 5);
        console.set_palette(2, &plate(1, 1, 0x0422).palette);
        assert_eq!(bg(&console, 5, 5), Some(to_rgb(0x0422)));
    }

    #[test]
    fn window_covers_images() {
        let mut console = console(6);
        video::show_image(&mut console, &mut ImageCursor::new(256), &plate(40, 28, 0x0A62), 1, 0, 0);
        console.clear_rect(Plane::A, TileAttr::full(0, false, false, false, 0x05A0), 1, 20, 38, 6);

        assert!(console.cells[20][1].window);
        assert_eq!(bg(&console, 1, 20), Some(Color::Black));
        assert_eq!(bg(&console, 0, 20), Some(Color::Rgb(36, 108, 180)));
        assert!(!console.cells[19][1].window);
    }

    #[test]
    fn images_only_land_on_plane_b() {
        let mut console = console(6);
        let image = plate(2, 2, 0x0A62);
        console.set_tile_map(Plane::A, TileAttr::full(1, false, false, false, 256), &image.tilemap, 0, 0);
        assert_eq!(console.cells[0][0].image, None);
    }

    #[test]
    fn clear_rect_blanks_text() {
        let mut console = console(6);
        console.draw_text("Hello", 2, 3);
        console.clear_rect(Plane::A, TileAttr::empty(), 3, 3, 2, 1);
        assert_eq!(&row(&console, 3)[..8], "  H  llo");
        assert!(console.cells[3][3].window);
        assert!(!console.cells[3][2].window);

        console.clear_rect(Plane::B, TileAttr::empty(), 0, 3, COLS as u16, 1);
        assert_eq!(row(&console, 3).trim(), "");
        assert!(!console.cells[3][3].window);
    }

    #[test]
    fn text_is_clipped_at_the_right_edge() {
        let mut console = console(6);
        console.draw_text("abcdef", COLS as u16 - 3, 0);
        assert!(row(&console, 0).ends_with("abc"));

        console.draw_text("offscreen", 0, ROWS as u16);
        assert!(console.cells.iter().all(|row| !row.iter().any(|cell| cell.ch == 'o')));
    }

    #[test]
    fn key_press_holds_then_releases() {
        let mut console = console(3);
        let mut latch = InputLatch::new(JoyPort::Joy1);

        console.press(KeyCode::Char('j'));
        console.update_pad(&mut latch);
        assert!(latch.down);
        assert_eq!(console.state, Buttons::DOWN);

        for _ in 0..2 {
            console.release_keys();
            console.update_pad(&mut latch);
            assert!(latch.down);
        }

        console.release_keys();
        console.update_pad(&mut latch);
        assert!(!latch.down);
        assert_eq!(console.state, Buttons::empty());
    }

    #[test]
    fn held_keys_combine() {
        let mut console = console(4);
        let mut latch = InputLatch::new(JoyPort::Joy1);

        console.press(KeyCode::Up);
        console.update_pad(&mut latch);
        console.release_keys();
        console.press(KeyCode::Char('x'));
        console.update_pad(&mut latch);

        assert_eq!(console.state, Buttons::UP | Buttons::B);
        assert!(latch.up && latch.confirm);
        assert!(!latch.down);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut console = console(4);
        let mut latch = InputLatch::new(JoyPort::Joy1);
        console.press(KeyCode::Char('w'));
        console.update_pad(&mut latch);
        assert_eq!(console.state, Buttons::empty());
        assert_eq!(latch, InputLatch::new(JoyPort::Joy1));
    }

    #[test]
    fn rgb_conversion() {
        assert_eq!(to_rgb(0x0A62), Color::Rgb(36, 108, 180));
        assert_eq!(to_rgb(0x0EEE), Color::Rgb(252, 252, 252));
        assert_eq!(to_rgb(0), Color::Rgb(0, 0, 0));
    }
}
