//! ASCII gallows. One body part is added per incorrect guess, up to
//! [`PART_COUNT`] parts; the classic stick figure is complete after six.

const WIDTH: usize = 22;
const HEIGHT: usize = 18;

pub const PART_COUNT: usize = 20;

type Stroke = (usize, usize, &'static str);

const GALLOWS: &[Stroke] = &[
    (0, 4, "+-----------+"),
    (1, 4, "|"),
    (1, 16, "|"),
    (2, 4, "|"),
    (3, 4, "|"),
    (4, 4, "|"),
    (5, 4, "|"),
    (6, 4, "|"),
    (7, 4, "|"),
    (8, 4, "|"),
    (9, 4, "|"),
    (10, 4, "|"),
    (11, 4, "|"),
    (12, 4, "|"),
    (13, 4, "|"),
    (14, 4, "|"),
    (15, 4, "|"),
    (16, 0, "----+----"),
    (17, 0, "|"),
    (17, 8, "|"),
];

// Sides are the figure's own, so its left is on the viewer's right.
const PARTS: [&[Stroke]; PART_COUNT] = [
    // head
    &[
        (2, 14, "_____"),
        (3, 13, "/"),
        (3, 19, "\\"),
        (4, 13, "|"),
        (4, 19, "|"),
        (5, 13, "|"),
        (5, 19, "|"),
        (6, 13, "\\_____/"),
    ],
    // body
    &[(7, 16, "|"), (8, 16, "|"), (9, 16, "|"), (10, 16, "|"), (11, 16, "|")],
    // left arm
    &[(8, 17, "\\"), (9, 18, "\\"), (10, 19, "\\")],
    // right arm
    &[(8, 15, "/"), (9, 14, "/"), (10, 13, "/")],
    // left leg
    &[(12, 17, "\\"), (13, 18, "\\"), (14, 19, "\\")],
    // right leg
    &[(12, 15, "/"), (13, 14, "/"), (14, 13, "/")],
    // left eye
    &[(4, 17, "o")],
    // right eye
    &[(4, 15, "o")],
    // nose
    &[(4, 16, "^")],
    // mouth
    &[(5, 15, "---")],
    // left ear
    &[(4, 20, ")")],
    // right ear
    &[(4, 12, "(")],
    // left eyebrow
    &[(3, 17, "~")],
    // right eyebrow
    &[(3, 15, "~")],
    // left hand fingers
    &[(10, 20, "-")],
    &[(11, 20, "\\")],
    &[(11, 19, "|")],
    // right hand fingers
    &[(10, 12, "-")],
    &[(11, 12, "/")],
    &[(11, 13, "|")],
];

fn draw(canvas: &mut [[char; WIDTH]; HEIGHT], strokes: &[Stroke]) {
    for &(row, col, text) in strokes {
        for (offset, ch) in text.chars().enumerate() {
            if let Some(cell) = canvas.get_mut(row).and_then(|r| r.get_mut(col + offset)) {
                *cell = ch;
            }
        }
    }
}

/// Renders the gallows with one part per incorrect guess. Lines have their
/// trailing spaces removed.
#[must_use]
pub fn render_gallows(incorrect: u32) -> Vec<String> {
    let mut canvas = [[' '; WIDTH]; HEIGHT];
    draw(&mut canvas, GALLOWS);

    let parts = usize::try_from(incorrect).unwrap_or(PART_COUNT).min(PART_COUNT);
    for part in &PARTS[..parts] {
        draw(&mut canvas, part);
    }

    canvas
        .iter()
        .map(|row| row.iter().collect::<String>().trim_end().to_string())
        .collect()
}
