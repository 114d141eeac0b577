use finsync_core::queue::{JobQueue, MemoryJobQueue, QueueJob};
use finsync_primitives::models::entities::enum_types::RefreshJobType;
use std::time::Duration;
use tokio::time::timeout;
use uuid::Uuid;

fn job(user_id: Uuid, job_type: RefreshJobType) -> QueueJob {
    QueueJob {
        user_id,
        job_type,
        job_db_id: None,
    }
}

#[test]
fn job_key_is_type_dash_user() {
    let user_id = Uuid::new_v4();
    assert_eq!(
        job(user_id, RefreshJobType::Manual).job_key(),
        format!("manual-{}", user_id)
    );
    assert_eq!(
        job(user_id, RefreshJobType::Scheduled).job_key(),
        format!("scheduled-{}", user_id)
    );
}

#[tokio::test]
async fn enqueue_delivers_to_the_worker_channel() {
    let (queue, mut rx) = MemoryJobQueue::new();
    let user_id = Uuid::new_v4();

    let queue_job_id = queue.enqueue(job(user_id, RefreshJobType::Manual)).await.unwrap();
    assert!(!queue_job_id.is_empty());

    let received = rx.try_recv().expect("job should be waiting");
    assert_eq!(received.user_id, user_id);
}

#[tokio::test]
async fn delayed_entry_fires_once_after_the_delay() {
    let (queue, mut rx) = MemoryJobQueue::new();
    let user_id = Uuid::new_v4();

    queue
        .enqueue_delayed(
            job(user_id, RefreshJobType::Scheduled),
            Duration::from_millis(50),
        )
        .await
        .unwrap();
    assert_eq!(queue.delayed_len(), 1);
    assert!(rx.try_recv().is_err());

    let received = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("delayed job should fire")
        .expect("channel should stay open");
    assert_eq!(received.user_id, user_id);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(queue.delayed_len(), 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn clean_delayed_cancels_a_pending_entry() {
    let (queue, mut rx) = MemoryJobQueue::new();
    let queue_job = job(Uuid::new_v4(), RefreshJobType::Manual);
    let key = queue_job.job_key();

    queue
        .enqueue_delayed(queue_job, Duration::from_millis(50))
        .await
        .unwrap();
    queue.clean_delayed(&key).await;
    assert_eq!(queue.delayed_len(), 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn newer_delayed_entry_replaces_the_old_one_for_a_key() {
    let (queue, mut rx) = MemoryJobQueue::new();
    let user_id = Uuid::new_v4();

    queue
        .enqueue_delayed(
            job(user_id, RefreshJobType::Scheduled),
            Duration::from_secs(600),
        )
        .await
        .unwrap();
    queue
        .enqueue_delayed(
            job(user_id, RefreshJobType::Scheduled),
            Duration::from_millis(50),
        )
        .await
        .unwrap();
    assert_eq!(queue.delayed_len(), 1);

    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("replacement entry should fire")
        .expect("channel should stay open");

    // The superseded entry must never fire.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(rx.try_recv().is_err());
}
