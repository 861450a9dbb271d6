//! End-to-end roster tests
//!
//! These run the services against the in-process store and check the
//! roster after each step.

use anyhow::Result;
use chrono::{Duration, Utc};
use integration_tests::*;
use raid_core::Snowflake;
use raid_service::dto::{CreateRaidRequest, RecordLootRequest, SelectRolesRequest, UpdateRaidRequest};
use raid_service::{HistoryWindow, LootService, SignupService};

// ============================================================================
// Signup Tests
// ============================================================================

#[tokio::test]
async fn test_signups_fill_slots_then_wait() -> Result<()> {
    let rig = TestRig::start();
    let raid_id = rig.raid_with_slots(2).await?;

    let mut outcomes = Vec::new();
    for account in 10..13 {
        let character = rig.character(account, classes::MAGE).await?;
        outcomes.push(rig.sign_up(raid_id, character).await?);
    }

    assert_eq!(outcomes[0].position, Some(0));
    assert_eq!(outcomes[1].position, Some(1));
    assert!(!outcomes[2].placed);

    let raid = rig.raid(raid_id).await?;
    assert_single_occupancy(&raid)?;
    assert_eq!(raid.confirmed.len(), 2);
    assert_eq!(raid.waiting_names(), vec![outcomes[2].signup.character_name.as_str()]);
    Ok(())
}

#[tokio::test]
async fn test_every_signup_is_confirmed_or_waiting() -> Result<()> {
    let rig = TestRig::start();
    let raid_id = rig.raid_with_slots(3).await?;

    for account in 20..27 {
        let character = rig.character(account, classes::PRIEST).await?;
        rig.sign_up(raid_id, character).await?;
    }

    let raid = rig.raid(raid_id).await?;
    assert_single_occupancy(&raid)?;
    assert_eq!(raid.confirmed.len() + raid.waiting_names().len(), 7);
    Ok(())
}

#[tokio::test]
async fn test_placed_account_hides_its_other_signups() -> Result<()> {
    let rig = TestRig::start();
    let raid_id = rig.raid_with_slots(1).await?;

    let main = rig.character_named(30, "Varian", classes::WARRIOR, true).await?;
    let alt = rig.character_named(30, "Anduin", classes::PRIEST, false).await?;
    let other = rig.character_named(31, "Sylvanas", classes::MAGE, true).await?;

    rig.sign_up(raid_id, main).await?;
    rig.sign_up(raid_id, alt).await?;
    rig.sign_up(raid_id, other).await?;

    let raid = rig.raid(raid_id).await?;
    assert_eq!(raid.confirmed_names(), vec!["Varian"]);
    assert_eq!(raid.waiting_names(), vec!["Sylvanas"]);

    let own = rig.signups().signups_from(raid_id, Snowflake::new(30)).await?;
    assert_eq!(own.len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_signups_never_share_a_slot() -> Result<()> {
    let rig = TestRig::start();
    let raid_id = rig.raid_with_slots(5).await?;

    let mut characters = Vec::new();
    for account in 100..120 {
        characters.push(rig.character(account, classes::WARRIOR).await?);
    }

    let handles: Vec<_> = characters
        .into_iter()
        .map(|character| {
            let rig = rig.clone();
            tokio::spawn(async move { rig.sign_up(raid_id, character).await })
        })
        .collect();

    let mut placed = 0;
    for handle in handles {
        if handle.await??.placed {
            placed += 1;
        }
    }

    let raid = rig.raid(raid_id).await?;
    assert_single_occupancy(&raid)?;
    assert_eq!(placed, 5);
    assert_eq!(raid.confirmed.len(), 5);
    assert_eq!(raid.waiting_names().len(), 15);
    Ok(())
}

// ============================================================================
// Withdrawal Tests
// ============================================================================

#[tokio::test]
async fn test_withdrawal_gives_slot_to_next_signup() -> Result<()> {
    let rig = TestRig::start();
    let template_id = rig
        .create_template(template_request(vec![
            template_slot(&["tank"], &[classes::WARRIOR]),
            open_slot(),
        ]))
        .await?;
    let raid_id = rig
        .create_raid(CreateRaidRequest {
            template_id: Some(template_id),
            ..raid_request(2)
        })
        .await?;

    let first_warrior = rig.character_named(40, "Garrosh", classes::WARRIOR, true).await?;
    let mage = rig.character_named(41, "Khadgar", classes::MAGE, true).await?;
    let second_warrior = rig.character_named(42, "Bolvar", classes::WARRIOR, true).await?;

    rig.sign_up(raid_id, first_warrior).await?;
    rig.sign_up(raid_id, mage).await?;
    rig.sign_up(raid_id, second_warrior).await?;

    let raid = rig.raid(raid_id).await?;
    assert_eq!(occupants(&raid), vec![Some("Garrosh"), Some("Khadgar")]);
    assert_eq!(raid.waiting_names(), vec!["Bolvar"]);

    assert!(rig.signups().withdraw(raid_id, mage).await?);

    let raid = rig.raid(raid_id).await?;
    assert_eq!(occupants(&raid), vec![Some("Garrosh"), Some("Bolvar")]);
    assert!(raid.waiting_names().is_empty());
    assert_single_occupancy(&raid)?;
    Ok(())
}

#[tokio::test]
async fn test_finalized_raid_keeps_roster_on_withdrawal() -> Result<()> {
    let rig = TestRig::start();
    let raid_id = rig.raid_with_slots(1).await?;

    let first = rig.character_named(50, "Tyrande", classes::PRIEST, true).await?;
    let second = rig.character_named(51, "Malfurion", classes::PRIEST, true).await?;
    rig.sign_up(raid_id, first).await?;
    rig.sign_up(raid_id, second).await?;

    assert!(rig.raids().toggle_finalized(raid_id).await?.finalized);
    assert!(rig.signups().withdraw(raid_id, first).await?);

    let raid = rig.raid(raid_id).await?;
    assert_eq!(occupants(&raid), vec![None]);
    assert_eq!(raid.waiting_names(), vec!["Malfurion"]);

    assert!(!rig.raids().toggle_finalized(raid_id).await?.finalized);
    assert_eq!(rig.signups().fill_waiting_list(raid_id).await?, 1);
    assert_eq!(occupants(&rig.raid(raid_id).await?), vec![Some("Malfurion")]);
    Ok(())
}

#[tokio::test]
async fn test_filling_the_waiting_list_twice_changes_nothing() -> Result<()> {
    let rig = TestRig::start();
    let raid_id = rig.raid_with_slots(2).await?;

    for account in 60..64 {
        let character = rig.character(account, classes::MAGE).await?;
        rig.sign_up(raid_id, character).await?;
    }

    let before = rig.raid(raid_id).await?;
    assert_eq!(rig.signups().fill_waiting_list(raid_id).await?, 0);
    assert_eq!(rig.signups().fill_waiting_list(raid_id).await?, 0);
    let after = rig.raid(raid_id).await?;

    assert_eq!(occupants(&before), occupants(&after));
    assert_eq!(before.waiting_names(), after.waiting_names());
    Ok(())
}

#[tokio::test]
async fn test_selecting_roles_moves_signup_out_of_slot() -> Result<()> {
    let rig = TestRig::start();
    let template_id = rig
        .create_template(template_request(vec![template_slot(&["healer"], &[])]))
        .await?;
    let raid_id = rig
        .create_raid(CreateRaidRequest {
            template_id: Some(template_id),
            ..raid_request(1)
        })
        .await?;

    let priest = rig.character_named(70, "Velen", classes::PRIEST, true).await?;
    let outcome = rig.sign_up(raid_id, priest).await?;
    assert!(outcome.placed);

    let signup_id = Snowflake::parse(&outcome.signup.id)?;
    let outcome = rig
        .signups()
        .select_roles(raid_id, signup_id, SelectRolesRequest {
            roles: vec!["tank".to_string()],
        })
        .await?;
    assert!(!outcome.placed);
    assert_eq!(rig.raid(raid_id).await?.waiting_names(), vec!["Velen"]);
    Ok(())
}

// ============================================================================
// Layout Tests
// ============================================================================

#[tokio::test]
async fn test_shrinking_raid_moves_tail_to_waiting_list() -> Result<()> {
    let rig = TestRig::start();
    let raid_id = rig.raid_with_slots(10).await?;

    let mut names = Vec::new();
    for account in 200..210 {
        let name = format!("Raider{account}");
        let character = rig.character_named(account, &name, classes::WARRIOR, true).await?;
        rig.sign_up(raid_id, character).await?;
        names.push(name);
    }

    let raid = rig
        .raids()
        .update_raid(raid_id, UpdateRaidRequest {
            number_of_slots: Some(5),
            ..Default::default()
        })
        .await?;

    assert_eq!(raid.number_of_slots, 5);
    assert_eq!(raid.confirmed_names(), names[..5].iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(raid.waiting_names(), names[5..].iter().map(String::as_str).collect::<Vec<_>>());
    assert_single_occupancy(&raid)?;
    Ok(())
}

#[tokio::test]
async fn test_growing_raid_backfills_waiting_list() -> Result<()> {
    let rig = TestRig::start();
    let raid_id = rig.raid_with_slots(1).await?;

    for account in 210..213 {
        let character = rig.character(account, classes::MAGE).await?;
        rig.sign_up(raid_id, character).await?;
    }

    let raid = rig
        .raids()
        .update_raid(raid_id, UpdateRaidRequest {
            number_of_slots: Some(3),
            ..Default::default()
        })
        .await?;

    assert_eq!(raid.confirmed.len(), 3);
    assert!(raid.waiting_names().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_template_keeps_fitting_occupants_and_evicts_others() -> Result<()> {
    let rig = TestRig::start();
    let raid_id = rig.raid_with_slots(3).await?;

    let warrior = rig.character_named(80, "Saurfang", classes::WARRIOR, true).await?;
    let priest = rig.character_named(81, "Moira", classes::PRIEST, true).await?;
    let mage = rig.character_named(82, "Antonidas", classes::MAGE, true).await?;
    for character in [warrior, priest, mage] {
        rig.sign_up(raid_id, character).await?;
    }

    let template_id = rig
        .create_template(template_request(vec![
            template_slot(&["tank"], &[classes::WARRIOR]),
            template_slot(&["healer"], &[classes::PRIEST]),
            template_slot(&["tank"], &[classes::WARRIOR]),
        ]))
        .await?;

    let raid = rig.templates().apply_template(raid_id, template_id).await?;

    assert_eq!(occupants(&raid), vec![Some("Saurfang"), Some("Moira"), None]);
    assert_eq!(raid.waiting_names(), vec!["Antonidas"]);
    assert_eq!(occupant_id(&raid, 0)?, Some(warrior));
    Ok(())
}

#[tokio::test]
async fn test_editing_template_leaves_applied_raid_alone() -> Result<()> {
    let rig = TestRig::start();
    let template_id = rig
        .create_template(template_request(vec![open_slot(), open_slot()]))
        .await?;
    let raid_id = rig
        .create_raid(CreateRaidRequest {
            template_id: Some(template_id),
            number_of_slots: None,
            ..raid_request(1)
        })
        .await?;

    rig.templates()
        .update_template(template_id, template_request(vec![open_slot()]))
        .await?;

    assert_eq!(rig.raid(raid_id).await?.number_of_slots, 2);
    Ok(())
}

// ============================================================================
// Raid Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_raid_with_loot_cannot_be_deleted() -> Result<()> {
    let rig = TestRig::start();
    let raid_id = rig.raid_with_slots(2).await?;
    let character = rig.character(90, classes::WARRIOR).await?;
    rig.sign_up(raid_id, character).await?;

    LootService::new(&rig.ctx)
        .record_loot(raid_id, RecordLootRequest {
            character_id: character,
            item: "Thunderfury".to_string(),
        })
        .await?;

    let err = rig.raids().delete_raid(raid_id).await.unwrap_err();
    assert_eq!(err.status_code(), 409);
    assert!(rig.raid(raid_id).await.is_ok());

    let empty_raid = rig.raid_with_slots(2).await?;
    rig.raids().delete_raid(empty_raid).await?;
    assert_eq!(rig.raids().get_raid(empty_raid).await.unwrap_err().status_code(), 404);
    Ok(())
}

#[tokio::test]
async fn test_listing_keeps_recently_started_raids_upcoming() -> Result<()> {
    let rig = TestRig::start();
    let now = Utc::now();

    let started = rig.create_raid(raid_request_at(now - Duration::hours(2), 5)).await?;
    let finished = rig.create_raid(raid_request_at(now - Duration::hours(10), 5)).await?;
    let ancient = rig.create_raid(raid_request_at(now - Duration::days(60), 5)).await?;
    let tomorrow = rig.raid_with_slots(5).await?;

    let listing = rig.raids().list_raids().await?;
    let upcoming: Vec<_> = listing.upcoming.iter().map(|r| r.id.clone()).collect();
    let old: Vec<_> = listing.old.iter().map(|r| r.id.clone()).collect();

    assert_eq!(upcoming, vec![started.to_string(), tomorrow.to_string()]);
    assert_eq!(old, vec![finished.to_string(), ancient.to_string()]);

    let last_month = rig.raids().recent_raids(HistoryWindow::LastMonth).await?;
    assert_eq!(last_month.len(), 2);
    assert_eq!(rig.raids().recent_raids(HistoryWindow::Past).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_word_dates_and_started_flag() -> Result<()> {
    let rig = TestRig::start();

    let tomorrow = rig.raid(rig.raid_with_slots(5).await?).await?;
    assert_eq!(tomorrow.word_date, "Tomorrow");
    assert!(!tomorrow.started);

    let past = rig
        .create_raid(raid_request_at(Utc::now() - Duration::days(3), 5))
        .await?;
    let past = rig.raid(past).await?;
    assert_eq!(past.word_date, "In the past");
    assert!(past.started);
    Ok(())
}

#[tokio::test]
async fn test_roster_events_follow_signups() -> Result<()> {
    let rig = TestRig::start();
    let raid_id = rig.raid_with_slots(1).await?;
    let mut events = rig.ctx.subscribe();

    let first = rig.character(300, classes::MAGE).await?;
    let second = rig.character(301, classes::MAGE).await?;
    rig.sign_up(raid_id, first).await?;
    rig.sign_up(raid_id, second).await?;

    assert_eq!(events.recv().await?.event_type(), "PLACED");
    assert_eq!(events.recv().await?.event_type(), "WAITLISTED");

    SignupService::new(&rig.ctx).withdraw(raid_id, first).await?;
    let mut kinds = Vec::new();
    while let Ok(event) = events.try_recv() {
        kinds.push(event.event_type());
    }
    assert!(kinds.contains(&"SIGNUP_REMOVED"));
    assert_eq!(kinds.last(), Some(&"PLACED"));
    Ok(())
}
