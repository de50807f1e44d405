//! Snapshot tests for rendered command lines
//!
//! Review changes: `cargo insta review`

use std::path::PathBuf;

use phpunit_core::vocab::commands::CommandId;
use phpunit_core::vocab::shells::ShellId;
use phpunit_runner::command::{Target, plan};
use phpunit_runner::locator::{self, TestStyle};
use phpunit_runner::resolver::{ConfigRoot, TestBinary};

fn target(binary: TestBinary) -> Target {
    Target {
        file: PathBuf::from("/srv/shop/tests/Feature/CheckoutTest.php"),
        root: ConfigRoot {
            path: PathBuf::from("/srv/shop"),
            found: true,
        },
        binary,
    }
}

fn vendor_phpunit() -> TestBinary {
    TestBinary::Path(PathBuf::from("/srv/shop/vendor/phpunit/phpunit/phpunit"))
}

fn render(id: CommandId, target: &Target, source: Option<&str>, shell: ShellId) -> String {
    let located = source.and_then(|s| locator::locate(s, s.len()));
    plan(id, target, located.as_ref()).unwrap().render(shell)
}

const PHPUNIT: &str = r#"<?php
final class CheckoutTest extends TestCase
{
    public function test_guest_can_checkout(): void
    {
"#;

const PEST: &str = r#"<?php
it("doesn't charge twice", function () {
"#;

#[test]
fn test_run_file_bash() {
    let line = render(CommandId::RunFile, &target(vendor_phpunit()), None, ShellId::Bash);
    insta::assert_snapshot!(line, @"cd /srv/shop && /srv/shop/vendor/phpunit/phpunit/phpunit /srv/shop/tests/Feature/CheckoutTest.php");
}

#[test]
fn test_run_all_fish() {
    let line = render(CommandId::RunAll, &target(vendor_phpunit()), None, ShellId::Fish);
    insta::assert_snapshot!(line, @"cd /srv/shop; and /srv/shop/vendor/phpunit/phpunit/phpunit");
}

#[test]
fn test_run_dir() {
    let line = render(CommandId::RunDir, &target(TestBinary::Bare("phpunit")), None, ShellId::Bash);
    insta::assert_snapshot!(line, @"cd /srv/shop && phpunit /srv/shop/tests/Feature");
}

#[test]
fn test_run_single_phpunit() {
    let line = render(CommandId::RunSingle, &target(vendor_phpunit()), Some(PHPUNIT), ShellId::Bash);
    insta::assert_snapshot!(line, @"cd /srv/shop && /srv/shop/vendor/phpunit/phpunit/phpunit /srv/shop/tests/Feature/CheckoutTest.php --filter '/::test_guest_can_checkout$/'");
}

#[test]
fn test_run_single_pest_bash_quoting() {
    let line = render(CommandId::RunSingle, &target(TestBinary::Bare("pest")), Some(PEST), ShellId::Bash);
    insta::assert_snapshot!(line, @r"cd /srv/shop && pest /srv/shop/tests/Feature/CheckoutTest.php --filter 'doesn'\''t charge twice'");
}

#[test]
fn test_run_single_pest_fish_quoting() {
    let line = render(CommandId::RunSingle, &target(TestBinary::Bare("pest")), Some(PEST), ShellId::Fish);
    insta::assert_snapshot!(line, @r"cd /srv/shop; and pest /srv/shop/tests/Feature/CheckoutTest.php --filter 'doesn\'t charge twice'");
}

#[test]
fn test_dusk_single() {
    let line = render(CommandId::DuskSingle, &target(vendor_phpunit()), Some(PHPUNIT), ShellId::Bash);
    insta::assert_snapshot!(line, @"cd /srv/shop && php artisan dusk /srv/shop/tests/Feature/CheckoutTest.php --filter test_guest_can_checkout");
}

#[test]
fn test_dusk_all_and_dir() {
    let all = render(CommandId::DuskAll, &target(vendor_phpunit()), None, ShellId::Bash);
    insta::assert_snapshot!(all, @"cd /srv/shop && php artisan dusk");
    let dir = render(CommandId::DuskDir, &target(vendor_phpunit()), None, ShellId::Fish);
    insta::assert_snapshot!(dir, @"cd /srv/shop; and php artisan dusk /srv/shop/tests/Feature");
}

#[test]
fn test_paths_with_spaces_are_quoted() {
    let target = Target {
        file: PathBuf::from("/Users/me/My Projects/shop/tests/CartTest.php"),
        root: ConfigRoot {
            path: PathBuf::from("/Users/me/My Projects/shop"),
            found: true,
        },
        binary: TestBinary::Bare("phpunit"),
    };
    let line = render(CommandId::RunFile, &target, None, ShellId::Bash);
    insta::assert_snapshot!(line, @"cd '/Users/me/My Projects/shop' && phpunit '/Users/me/My Projects/shop/tests/CartTest.php'");
}

#[test]
fn test_descriptive_style_is_recorded() {
    let located = locator::locate(PEST, PEST.len()).unwrap();
    assert_eq!(located.style, TestStyle::Descriptive);
    assert_eq!(located.name, "doesn't charge twice");
}
