/// Playlist service behavior against a live (in-memory) store
mod common;

use common::{playlist_service, seed_box, seed_user, test_pool};
use watchbox_core::types::{
    PlayOptions, PlaylistSubmissionRequest, QueueItemActionRequest, UserId, VideoSubmissionRequest,
};
use watchbox_server::error::ServerError;
use watchbox_storage::{boxes, playlists, queue, videos};

fn submit(box_token: &watchbox_core::types::BoxId, user: &UserId, link: &str) -> VideoSubmissionRequest {
    VideoSubmissionRequest {
        box_token: box_token.clone(),
        user_token: user.clone(),
        link: link.to_string(),
    }
}

#[tokio::test]
async fn submission_resolves_and_persists_an_upcoming_item() {
    let pool = test_pool().await;
    let service = playlist_service(&pool);
    let user = seed_user(&pool, "Ada").await;
    let box_id = seed_box(&pool, &user, PlayOptions::default()).await;

    let (message, session) = service
        .on_video_submitted(&submit(&box_id, &user, "yt-1"))
        .await
        .expect("submission");

    assert_eq!(session.playlist.len(), 1);
    assert!(session.playlist[0].is_upcoming());
    assert_eq!(session.playlist[0].video.name, "First video");
    assert_eq!(
        message.contents,
        "Ada has added the video \"First video\" to the playlist."
    );

    // The video record is reused on the next submission of the same link
    let stored = videos::get_by_link(&pool, "yt-1").await.expect("lookup");
    assert!(stored.is_some());
}

#[tokio::test]
async fn unknown_submitters_get_anonymous_wording() {
    let pool = test_pool().await;
    let service = playlist_service(&pool);
    let creator = seed_user(&pool, "Ada").await;
    let box_id = seed_box(&pool, &creator, PlayOptions::default()).await;

    let stranger = UserId::new("nobody");
    let (message, _) = service
        .on_video_submitted(&submit(&box_id, &stranger, "yt-2"))
        .await
        .expect("submission");

    assert_eq!(
        message.contents,
        "The video \"Second video\" has been added to the playlist."
    );
}

#[tokio::test]
async fn closed_boxes_reject_submissions() {
    let pool = test_pool().await;
    let service = playlist_service(&pool);
    let user = seed_user(&pool, "Ada").await;
    let box_id = seed_box(&pool, &user, PlayOptions::default()).await;
    boxes::set_open(&pool, &box_id, false).await.expect("close");

    let err = service
        .on_video_submitted(&submit(&box_id, &user, "yt-1"))
        .await
        .expect_err("closed box");

    assert!(matches!(err, ServerError::Conflict(_)));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn next_video_starts_the_earliest_submission() {
    let pool = test_pool().await;
    let service = playlist_service(&pool);
    let user = seed_user(&pool, "Ada").await;
    let box_id = seed_box(&pool, &user, PlayOptions::default()).await;

    for link in ["yt-1", "yt-2", "yt-3"] {
        service
            .on_video_submitted(&submit(&box_id, &user, link))
            .await
            .expect("submission");
    }

    let (started, session) = service.get_next_video(&box_id).await.expect("advance");
    let started = started.expect("an item starts");
    assert_eq!(started.video.name, "First video");

    // One playing item, positioned between the upcoming ones and history
    let playing: Vec<_> = session.playlist.iter().filter(|i| i.is_playing()).collect();
    assert_eq!(playing.len(), 1);
    assert_eq!(playing[0].video.name, "First video");

    let current = queue::current_item(&pool, &box_id).await.expect("current");
    assert_eq!(current.expect("playing").video.name, "First video");
}

#[tokio::test]
async fn advancing_an_empty_box_plays_nothing() {
    let pool = test_pool().await;
    let service = playlist_service(&pool);
    let user = seed_user(&pool, "Ada").await;
    let box_id = seed_box(&pool, &user, PlayOptions::default()).await;

    let (started, session) = service.get_next_video(&box_id).await.expect("advance");
    assert!(started.is_none());
    assert!(session.playlist.is_empty());
}

#[tokio::test]
async fn cancelling_a_submission_removes_it_whatever_its_state() {
    let pool = test_pool().await;
    let service = playlist_service(&pool);
    let user = seed_user(&pool, "Ada").await;
    let box_id = seed_box(&pool, &user, PlayOptions::default()).await;

    service
        .on_video_submitted(&submit(&box_id, &user, "yt-1"))
        .await
        .expect("submission");
    let (started, _) = service.get_next_video(&box_id).await.expect("advance");
    let started = started.expect("playing");

    // Removing the playing item leaves the box silent
    let (_, session) = service
        .on_video_cancelled(&QueueItemActionRequest {
            box_token: box_id.clone(),
            user_token: user.clone(),
            item: started.id.clone(),
        })
        .await
        .expect("cancel");

    assert!(session.playlist.is_empty());
    assert!(queue::current_item(&pool, &box_id)
        .await
        .expect("current")
        .is_none());
}

#[tokio::test]
async fn cancelling_an_unknown_item_is_a_terminal_not_found() {
    let pool = test_pool().await;
    let service = playlist_service(&pool);
    let user = seed_user(&pool, "Ada").await;
    let box_id = seed_box(&pool, &user, PlayOptions::default()).await;

    let err = service
        .on_video_cancelled(&QueueItemActionRequest {
            box_token: box_id,
            user_token: user,
            item: watchbox_core::types::QueueItemId::new("missing"),
        })
        .await
        .expect_err("unknown item");

    assert!(matches!(err, ServerError::NotFound(_)));
    assert!(!err.is_transient());
}

#[tokio::test]
async fn saved_playlists_expand_in_order() {
    let pool = test_pool().await;
    let service = playlist_service(&pool);
    let user = seed_user(&pool, "Ada").await;
    let box_id = seed_box(&pool, &user, PlayOptions::default()).await;

    let saved = playlists::create(&pool, "Warmup", Some(&user))
        .await
        .expect("playlist");
    for (link, name) in [("yt-1", "First video"), ("yt-2", "Second video")] {
        let video = videos::create(
            &pool,
            watchbox_core::types::CreateVideo {
                link: link.to_string(),
                name: name.to_string(),
                duration: "PT1M".to_string(),
            },
        )
        .await
        .expect("video");
        playlists::add_video(&pool, &saved.id, &video)
            .await
            .expect("add video");
    }

    let (message, session) = service
        .on_playlist_submitted(&PlaylistSubmissionRequest {
            box_token: box_id.clone(),
            user_token: user.clone(),
            playlist_id: saved.id,
        })
        .await
        .expect("expand");

    assert_eq!(session.playlist.len(), 2);
    assert!(message.contents.contains("Warmup"));

    // Playlist order is playback order
    let (first, _) = service.get_next_video(&box_id).await.expect("advance");
    assert_eq!(first.expect("playing").video.name, "First video");
    let (second, _) = service.get_next_video(&box_id).await.expect("advance");
    assert_eq!(second.expect("playing").video.name, "Second video");
}

#[tokio::test]
async fn replaying_an_item_not_in_history_is_not_found() {
    let pool = test_pool().await;
    let service = playlist_service(&pool);
    let user = seed_user(&pool, "Ada").await;
    let box_id = seed_box(&pool, &user, PlayOptions::default()).await;

    // The item exists but has never played
    let (_, session) = service
        .on_video_submitted(&submit(&box_id, &user, "yt-1"))
        .await
        .expect("submission");
    let upcoming = session.playlist[0].id.clone();

    let err = service
        .on_replay(&QueueItemActionRequest {
            box_token: box_id,
            user_token: user,
            item: upcoming,
        })
        .await
        .expect_err("not in history");

    assert!(matches!(err, ServerError::NotFound(_)));
}

#[tokio::test]
async fn replay_restarts_a_played_item() {
    let pool = test_pool().await;
    let service = playlist_service(&pool);
    let user = seed_user(&pool, "Ada").await;
    let box_id = seed_box(&pool, &user, PlayOptions::default()).await;

    service
        .on_video_submitted(&submit(&box_id, &user, "yt-1"))
        .await
        .expect("submission");
    let (started, _) = service.get_next_video(&box_id).await.expect("advance");
    let item = started.expect("playing");
    service.get_next_video(&box_id).await.expect("runs out");

    let (restarted, _, session) = service
        .on_replay(&QueueItemActionRequest {
            box_token: box_id,
            user_token: user,
            item: item.id.clone(),
        })
        .await
        .expect("replay");

    assert_eq!(restarted.id, item.id);
    assert!(restarted.is_playing());
    assert_eq!(
        session.playlist.iter().filter(|i| i.is_playing()).count(),
        1
    );
}
