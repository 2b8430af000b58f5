//! Static advance-width table for Helvetica (one of the PDF base-14 fonts).
//!
//! Widths are in 1/1000 em, covering ASCII 0x20..=0x7E. Index = (char as usize) - 32.
//! Characters outside the table fall back to `FALLBACK_WIDTH`.

const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

/// Advance width of `c` in 1/1000 em.
pub fn char_width(c: char) -> u16 {
    let code = c as usize;
    if (32..=126).contains(&code) {
        HELVETICA[code - 32]
    } else {
        FALLBACK_WIDTH
    }
}

/// Rendered width of `text` at `font_size`, in the same units as `font_size`.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    f64::from(units) * font_size / 1000.0
}
