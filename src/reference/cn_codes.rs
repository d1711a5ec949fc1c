// src/reference/cn_codes.rs

/// Commodity classification table: canonical variety code and the written
/// forms it appears under in the documents. Composite codes join their
/// sub-codes with periods and stand for one logical commodity.
pub const CN_CODES: &[(&str, &[&str])] = &[
    // tomatoes (with seasonal subdivision codes used in older documents)
    ("07020000", &["07020000", "07020015", "07020020", "07020025", "07020035", "07020045"]),
    // cucumbers
    ("07070005", &["07070005", "07070010", "07070015", "07070020"]),
    // artichokes
    ("07091000", &["07091000"]),
    ("07099100", &["07099100"]),
    // courgettes
    ("07099070", &["07099070", "07099073"]),
    // oranges
    ("08051001.08051005.08051009", &["08051001.08051005.08051009"]),
    // clementines
    ("08052011", &["08052011"]),
    // mandarins and satsumas
    ("08052030.08052050.08052070.08052090", &["08052030.08052050.08052070.08052090"]),
    ("08052070", &["08052070"]),
    // lemons
    ("08053010", &["08053010"]),
    ("08055010", &["08055010"]),
    // table grapes
    ("08061010", &["08061010", "08061011", "08061015"]),
    // apples
    ("08081020.08081050.08081090", &["08081020.08081050.08081090"]),
    ("08081051.08081053.08081059", &["08081051.08081053.08081059"]),
    ("08081092.08081094.08081098", &["08081092.08081094.08081098"]),
    // pears
    ("08082057", &["08082057"]),
    // apricots
    ("08091000", &["08091000"]),
    // cherries
    ("08092041.08092049", &["08092041.08092049", "08092051.08092059"]),
    // peaches (080930 is the pre-1995 six-digit heading)
    ("08093031.08093039", &["08093031.08093039", "080930"]),
    // plums
    ("08094005", &["08094005"]),
];
