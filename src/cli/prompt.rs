//! Prompt texts and answer parsing shared by the text and terminal front-ends.

use delve::game::{CombatAction, Command, Direction, Offer, ShopChoice};

/// Asked before hunting a passive creature.
pub(super) const HUNT: &str = "Hunt? (C/V)";
/// Asked every combat round.
pub(super) const COMBAT: &str = "(Z) Attack, (X) Run";
/// Asked when stepping onto a resource.
pub(super) const HARVEST: &str = "Harvest? (C/V)";
/// Asked for the next move in line mode.
pub(super) const MOVE: &str = "Move (w/a/s/d or up/down/left/right) or q:";

/// `C` confirms a hunt or a harvest; anything else declines.
pub(super) fn is_confirm(answer: char) -> bool {
    answer.eq_ignore_ascii_case(&'c')
}

/// `Z` attacks, `X` runs; anything else is unrecognized.
pub(super) fn combat_action(answer: char) -> Option<CombatAction> {
    match answer.to_ascii_lowercase() {
        'z' => Some(CombatAction::Attack),
        'x' => Some(CombatAction::Flee),
        _ => None,
    }
}

/// `0` exits, `n` buys the n-th offer. Out-of-range numbers are passed on
/// for the shop to reject.
pub(super) fn shop_choice(answer: &str) -> ShopChoice {
    match answer.trim().parse::<usize>() {
        Ok(0) => ShopChoice::Exit,
        Ok(n) => ShopChoice::Buy(n - 1),
        Err(_) => ShopChoice::Unrecognized,
    }
}

/// Numbered menu lines, ending with the exit entry.
pub(super) fn shop_menu(offers: &[Offer]) -> Vec<String> {
    offers
        .iter()
        .enumerate()
        .map(|(i, offer)| format!("{}: {} - {}", i + 1, offer.name, offer.price_label()))
        .chain(std::iter::once("0: Exit".to_string()))
        .collect()
}

/// Parse a line-mode move command.
pub(super) fn parse_command(input: &str) -> Option<Command> {
    let command = match input.trim().to_ascii_lowercase().as_str() {
        "w" | "up" => Command::Move(Direction::Up),
        "s" | "down" => Command::Move(Direction::Down),
        "a" | "left" => Command::Move(Direction::Left),
        "d" | "right" => Command::Move(Direction::Right),
        "q" | "quit" => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// First non-blank character of an answer line.
pub(super) fn first_char(answer: &str) -> Option<char> {
    answer.trim().chars().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve::game::Shop;

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("w"), Some(Command::Move(Direction::Up)));
        assert_eq!(parse_command(" LEFT \n"), Some(Command::Move(Direction::Left)));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("jump"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_shop_choice() {
        assert_eq!(shop_choice("0"), ShopChoice::Exit);
        assert_eq!(shop_choice("2\n"), ShopChoice::Buy(1));
        assert_eq!(shop_choice("9"), ShopChoice::Buy(8));
        assert_eq!(shop_choice("sword"), ShopChoice::Unrecognized);
    }

    #[test]
    fn test_shop_menu() {
        let menu = shop_menu(&Shop::standard().offers);
        assert_eq!(
            menu,
            vec!["1: Sword - 20Gold,5Wood", "2: Potion - 10Gold", "0: Exit"]
        );
    }

    #[test]
    fn test_answers() {
        assert!(is_confirm('c'));
        assert!(is_confirm('C'));
        assert!(!is_confirm('v'));
        assert_eq!(combat_action('Z'), Some(CombatAction::Attack));
        assert_eq!(combat_action('x'), Some(CombatAction::Flee));
        assert_eq!(combat_action('a'), None);
        assert_eq!(first_char("  c\n"), Some('c'));
        assert_eq!(first_char("\n"), None);
    }
}
