//! QR-style SVG rendering
//!
//! Draws a 21x21 QR-looking module grid (finder patterns, timing rows,
//! payload bits) as an SVG string. Purely presentational: there is no
//! Reed-Solomon error correction, so the output is not scannable.

/// Modules per side (version 1 layout)
const MODULES: usize = 21;

type Grid = [[bool; MODULES]; MODULES];

/// Render `text` as a QR-style SVG of `size` x `size` pixels.
pub fn render_svg(text: &str, size: u32) -> String {
    let module_size = f64::from(size) / MODULES as f64;
    let grid = text_to_modules(text);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    );
    svg.push_str(&format!(
        r#"<rect width="{size}" height="{size}" fill="white"/>"#
    ));

    for (y, row) in grid.iter().enumerate() {
        for (x, &dark) in row.iter().enumerate() {
            if dark {
                svg.push_str(&format!(
                    r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="black"/>"#,
                    x as f64 * module_size,
                    y as f64 * module_size,
                    module_size,
                    module_size,
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn text_to_modules(text: &str) -> Grid {
    let mut grid = [[false; MODULES]; MODULES];

    // Finder patterns: top-left, top-right, bottom-left
    add_finder_pattern(&mut grid, 0, 0);
    add_finder_pattern(&mut grid, MODULES - 7, 0);
    add_finder_pattern(&mut grid, 0, MODULES - 7);

    // Timing patterns along row and column 6
    for i in 8..MODULES - 8 {
        grid[6][i] = i % 2 == 0;
        grid[i][6] = i % 2 == 0;
    }

    // Payload bits fill the free area column-pair-wise, right to left
    let bits = text_to_bits(text);
    let mut bit_index = 0;
    let mut x = MODULES as isize - 1;
    while x >= 0 {
        if x == 6 {
            // Skip the timing column
            x = 5;
        }
        for y in 0..MODULES {
            for dx in 0..2 {
                let col = x - dx;
                if col < 0 {
                    continue;
                }
                let col = col as usize;
                if is_reserved(col, y) {
                    continue;
                }
                grid[y][col] = if bit_index < bits.len() {
                    let bit = bits[bit_index];
                    bit_index += 1;
                    bit
                } else {
                    false
                };
            }
        }
        x -= 2;
    }

    grid
}

fn add_finder_pattern(grid: &mut Grid, start_x: usize, start_y: usize) {
    for y in 0..7 {
        for x in 0..7 {
            let border = y == 0 || y == 6 || x == 0 || x == 6;
            let center = (2..=4).contains(&y) && (2..=4).contains(&x);
            grid[start_y + y][start_x + x] = border || center;
        }
    }
}

fn is_reserved(x: usize, y: usize) -> bool {
    // Finder patterns plus separators
    if x < 9 && y < 9 {
        return true;
    }
    if x >= MODULES - 8 && y < 9 {
        return true;
    }
    if x < 9 && y >= MODULES - 8 {
        return true;
    }
    // Timing patterns
    x == 6 || y == 6
}

fn text_to_bits(text: &str) -> Vec<bool> {
    let mut bits = Vec::with_capacity(text.len() * 8);
    for byte in text.bytes() {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1 == 1);
        }
    }
    bits
}
