use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use door_maze::{Dir, Pos, Session};
use rand::Rng;
use unicode_width::UnicodeWidthStr;

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Exit,
    Wall,
    Empty,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    notice: Option<String>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    fn new() -> Self {
        Self {
            last: Vec::new(),
            last_hud: String::new(),
            notice: None,
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

enum Action {
    Move(Dir),
    ResetPosition,
    NewMaze,
    Quit,
}

fn action_for(code: KeyCode) -> Option<Action> {
    let action = match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Action::Move(Dir::North),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Action::Move(Dir::East),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Action::Move(Dir::South),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Action::Move(Dir::West),
        KeyCode::Char('r') => Action::ResetPosition,
        KeyCode::Char('n') => Action::NewMaze,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}

pub fn run(stdout: &mut Stdout, mut session: Session, rng: &mut impl Rng) -> io::Result<()> {
    let mut renderer = Renderer::new();
    let mut moves = 0u32;
    render(stdout, &session, moves, &mut renderer)?;

    loop {
        let Event::Key(key) = event::read()? else {
            // resize and friends
            renderer.needs_full = true;
            render(stdout, &session, moves, &mut renderer)?;
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match action_for(key.code) {
            Some(Action::Move(dir)) => {
                if session.move_player(dir) {
                    moves += 1;
                }
            }
            Some(Action::ResetPosition) => session.reset_position(),
            Some(Action::NewMaze) => new_maze(&mut session, rng, &mut moves, &mut renderer),
            Some(Action::Quit) => return Ok(()),
            None => continue,
        }
        render(stdout, &session, moves, &mut renderer)?;

        if session.has_escaped() {
            if !render_escaped(stdout, &session, moves)? {
                return Ok(());
            }
            new_maze(&mut session, rng, &mut moves, &mut renderer);
            render(stdout, &session, moves, &mut renderer)?;
        }
    }
}

/// On failure the session keeps its current maze and position and the HUD
/// reports why.
fn new_maze(session: &mut Session, rng: &mut impl Rng, moves: &mut u32, renderer: &mut Renderer) {
    renderer.needs_full = true;
    match session.regenerate(rng) {
        Ok(()) => {
            *moves = 0;
            renderer.notice = None;
        }
        Err(err) => renderer.notice = Some(format!("New maze failed: {err}")),
    }
}

/// Lattice of (2 * rows + 1) x (2 * cols + 1) slots: cells sit at odd
/// coordinates, door slots between them, posts at even/even.
fn lattice_size(session: &Session) -> (usize, usize) {
    let grid = &session.maze().grid;
    (grid.cols() * 2 + 1, grid.rows() * 2 + 1)
}

fn cell_for(session: &Session, x: usize, y: usize) -> Cell {
    let maze = session.maze();
    let grid = &maze.grid;
    let (width, height) = lattice_size(session);
    let wall = Cell {
        glyph: Glyph::Wall,
        color: Color::DarkGrey,
    };
    let empty = Cell {
        glyph: Glyph::Empty,
        color: Color::Reset,
    };

    let open = match (x % 2, y % 2) {
        (1, 1) => {
            let pos = Pos::new(y / 2, x / 2);
            if pos == session.player() {
                return Cell {
                    glyph: Glyph::Player,
                    color: Color::Yellow,
                };
            }
            if pos == maze.exit {
                return Cell {
                    glyph: Glyph::Exit,
                    color: Color::Red,
                };
            }
            true
        }
        (1, 0) => y > 0 && y < height - 1 && grid.is_open(Pos::new(y / 2 - 1, x / 2), Dir::South),
        (0, 1) => x > 0 && x < width - 1 && grid.is_open(Pos::new(y / 2, x / 2 - 1), Dir::East),
        _ => false,
    };
    if open {
        empty
    } else {
        wall
    }
}

fn glyph_text(glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Player => "😃",
        Glyph::Exit => "🚩",
        Glyph::Wall => "██",
        Glyph::Empty => "  ",
    }
}

fn padded(text: &str) -> String {
    let w = UnicodeWidthStr::width(text);
    let mut out = text.to_string();
    for _ in w..CELL_W {
        out.push(' ');
    }
    out
}

/// Plain-text picture of the current maze.
pub fn render_text(session: &Session) -> String {
    let (width, height) = lattice_size(session);
    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(&padded(glyph_text(cell_for(session, x, y).glyph)));
        }
        out.push('\n');
    }
    let maze = session.maze();
    out.push_str(&format!("start {}  exit {}\n", maze.start, maze.exit));
    out
}

/// Where the lattice sits on screen, or the size it needs when the
/// terminal is too small.
enum Placement {
    Fits { origin_x: u16, origin_y: u16 },
    TooSmall { needed_w: u16, needed_h: u16 },
}

fn place_on_screen(session: &Session, term_w: u16, term_h: u16) -> Placement {
    let (width, height) = lattice_size(session);
    // one line above for the HUD, one below for banners
    let needed_w = u16::try_from(width * CELL_W).unwrap_or(u16::MAX);
    let needed_h = u16::try_from(height + 2).unwrap_or(u16::MAX);
    if term_w < needed_w || term_h < needed_h {
        return Placement::TooSmall { needed_w, needed_h };
    }
    Placement::Fits {
        origin_x: (term_w - needed_w) / 2,
        origin_y: (term_h - needed_h) / 2 + 1,
    }
}

fn hud_text(moves: u32, notice: Option<&str>) -> String {
    match notice {
        Some(notice) => format!("Moves: {moves}  {notice}  (r reset, n retry, q quit)"),
        None => format!("Moves: {moves}  (arrows/wasd/hjkl move, r reset, n new maze, q quit)"),
    }
}

fn render(stdout: &mut Stdout, session: &Session, moves: u32, renderer: &mut Renderer) -> io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let (origin_x, origin_y) = match place_on_screen(session, term_w, term_h) {
        Placement::Fits { origin_x, origin_y } => (origin_x, origin_y),
        Placement::TooSmall { needed_w, needed_h } => {
            stdout.queue(MoveTo(0, 0))?;
            stdout.queue(Clear(ClearType::All))?;
            stdout.queue(Print(format!(
                "Terminal too small: the maze needs {needed_w}x{needed_h}, have {term_w}x{term_h}."
            )))?;
            stdout.flush()?;
            renderer.needs_full = true;
            return Ok(());
        }
    };
    if (origin_x, origin_y) != (renderer.origin_x, renderer.origin_y) {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let (width, height) = lattice_size(session);
    if renderer.last.len() != width * height {
        renderer.last = vec![
            Cell {
                glyph: Glyph::Empty,
                color: Color::Reset,
            };
            width * height
        ];
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    let hud = hud_text(moves, renderer.notice.as_deref());
    if renderer.needs_full || hud != renderer.last_hud {
        let color = if renderer.notice.is_some() {
            Color::Red
        } else {
            Color::White
        };
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for (idx, (x, y)) in (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .enumerate()
    {
        let cell = cell_for(session, x, y);
        if renderer.needs_full || cell != renderer.last[idx] {
            renderer.last[idx] = cell;
            draw_cell(stdout, renderer, x, y, cell)?;
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn draw_cell(stdout: &mut Stdout, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(padded(glyph_text(cell.glyph))))?;
    stdout.queue(ResetColor)?;
    Ok(())
}

/// Shows the escape banner under the maze; false when the player quits.
fn render_escaped(stdout: &mut Stdout, session: &Session, moves: u32) -> io::Result<bool> {
    let (term_w, term_h) = terminal::size()?;
    let (_, height) = lattice_size(session);
    let banner_at = match place_on_screen(session, term_w, term_h) {
        Placement::Fits { origin_x, origin_y } => MoveTo(origin_x, origin_y + height as u16),
        Placement::TooSmall { .. } => MoveTo(0, 1),
    };
    stdout.queue(banner_at)?;
    stdout.queue(SetForegroundColor(Color::Green))?;
    stdout.queue(Print(format!(
        "Escaped in {moves} moves! Any key for a new maze, q to quit."
    )))?;
    stdout.queue(ResetColor)?;
    stdout.flush()?;
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(!matches!(key.code, KeyCode::Char('q') | KeyCode::Esc));
            }
        }
    }
}
