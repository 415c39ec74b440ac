//! Static tables for party-name normalization

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// Tokens that carry no identity: entity suffixes, marital and trust
/// qualifiers, alias markers
pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        // Entity suffixes
        "LLC", "INC", "INCORPORATED", "CORP", "CORPORATION", "LTD", "LIMITED", "CO",
        "COMPANY", "LP", "LLP", "PLLC", "PA", "NA", "FSB",
        // Marital qualifiers
        "HUSBAND", "WIFE", "HW", "HIS", "HER", "MARRIED", "UNMARRIED", "SINGLE", "WIDOW",
        "WIDOWER", "ETUX", "ETVIR", "ETAL",
        // Trust qualifiers
        "TRUST", "TRUSTEE", "TRUSTEES", "TR", "TTEE", "REVOCABLE", "IRREVOCABLE", "LIVING",
        "DATED", "UAD", "UTD",
        // Alias markers
        "AKA", "FKA", "NKA", "DBA",
        // Connectives
        "THE", "AND",
    ])
});

/// Second token of a split `ET AL` / `ET UX` / `ET VIR`
pub const ET_SUFFIXES: &[&str] = &["AL", "UX", "VIR"];

/// Nickname to canonical given name
pub static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("BOB", "ROBERT"),
        ("BOBBY", "ROBERT"),
        ("ROB", "ROBERT"),
        ("ROBBIE", "ROBERT"),
        ("BILL", "WILLIAM"),
        ("BILLY", "WILLIAM"),
        ("WILL", "WILLIAM"),
        ("WILLIE", "WILLIAM"),
        ("JIM", "JAMES"),
        ("JIMMY", "JAMES"),
        ("JAMIE", "JAMES"),
        ("JACK", "JOHN"),
        ("JOHNNY", "JOHN"),
        ("JON", "JOHN"),
        ("MIKE", "MICHAEL"),
        ("MICKEY", "MICHAEL"),
        ("DICK", "RICHARD"),
        ("RICK", "RICHARD"),
        ("RICH", "RICHARD"),
        ("RICKY", "RICHARD"),
        ("TOM", "THOMAS"),
        ("TOMMY", "THOMAS"),
        ("TONY", "ANTHONY"),
        ("JOE", "JOSEPH"),
        ("JOEY", "JOSEPH"),
        ("DAVE", "DAVID"),
        ("DAN", "DANIEL"),
        ("DANNY", "DANIEL"),
        ("STEVE", "STEVEN"),
        ("STEPHEN", "STEVEN"),
        ("CHRIS", "CHRISTOPHER"),
        ("MATT", "MATTHEW"),
        ("PAT", "PATRICK"),
        ("ED", "EDWARD"),
        ("EDDIE", "EDWARD"),
        ("TED", "THEODORE"),
        ("CHUCK", "CHARLES"),
        ("CHARLIE", "CHARLES"),
        ("HANK", "HENRY"),
        ("LARRY", "LAWRENCE"),
        ("JERRY", "GERALD"),
        ("SAM", "SAMUEL"),
        ("BEN", "BENJAMIN"),
        ("ALEX", "ALEXANDER"),
        ("ANDY", "ANDREW"),
        ("GREG", "GREGORY"),
        ("JEFF", "JEFFREY"),
        ("KEN", "KENNETH"),
        ("RON", "RONALD"),
        ("DON", "DONALD"),
        ("TIM", "TIMOTHY"),
        ("NICK", "NICHOLAS"),
        ("FRANK", "FRANCIS"),
        ("LIZ", "ELIZABETH"),
        ("BETH", "ELIZABETH"),
        ("BETTY", "ELIZABETH"),
        ("KATE", "KATHERINE"),
        ("KATHY", "KATHERINE"),
        ("CATHERINE", "KATHERINE"),
        ("SUE", "SUSAN"),
        ("PEGGY", "MARGARET"),
        ("MAGGIE", "MARGARET"),
        ("JENNY", "JENNIFER"),
        ("JEN", "JENNIFER"),
        ("PATTY", "PATRICIA"),
        ("TRISH", "PATRICIA"),
        ("DEBBIE", "DEBORAH"),
        ("BARB", "BARBARA"),
        ("VICKY", "VICTORIA"),
    ])
});

/// Canonical form of a single token
pub fn canonical_token(token: &str) -> &str {
    ALIASES.get(token).copied().unwrap_or(token)
}
