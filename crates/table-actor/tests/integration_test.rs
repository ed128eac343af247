use async_trait::async_trait;
use table_actor::{Row, TableActor, TableError};

// --- Test Row ---

#[derive(Clone, Debug, PartialEq)]
struct Booking {
    id: u32,
    guest: String,
    room: u16,
    nights: u32,
}

#[derive(Debug)]
struct BookingInsert {
    guest: String,
    room: u16,
    nights: u32,
}

#[derive(Debug)]
struct BookingPatch {
    nights: u32,
}

#[derive(Debug)]
enum BookingFilter {
    Guest(String),
    Room(u16),
}

#[derive(Debug, thiserror::Error)]
enum BookingError {
    #[error("a booking needs at least one night")]
    NoNights,
}

#[async_trait]
impl Row for Booking {
    type Id = u32;
    type Insert = BookingInsert;
    type Patch = BookingPatch;
    type Filter = BookingFilter;
    type Context = ();
    type Error = BookingError;

    fn from_insert(id: u32, params: BookingInsert) -> Result<Self, Self::Error> {
        if params.nights == 0 {
            return Err(BookingError::NoNights);
        }
        Ok(Self {
            id,
            guest: params.guest,
            room: params.room,
            nights: params.nights,
        })
    }

    fn id(&self) -> &u32 {
        &self.id
    }

    fn matches(&self, filter: &BookingFilter) -> bool {
        match filter {
            BookingFilter::Guest(guest) => &self.guest == guest,
            BookingFilter::Room(room) => self.room == *room,
        }
    }

    fn conflicts_with(&self, existing: &Self) -> bool {
        self.room == existing.room
    }

    async fn on_update(&mut self, patch: BookingPatch, _ctx: &()) -> Result<(), Self::Error> {
        // partially applied on purpose: the table must discard this copy on error
        self.nights = patch.nights;
        if patch.nights == 0 {
            return Err(BookingError::NoNights);
        }
        Ok(())
    }
}

fn booking(guest: &str, room: u16, nights: u32) -> BookingInsert {
    BookingInsert {
        guest: guest.to_string(),
        room,
        nights,
    }
}

fn start() -> (table_actor::TableClient<Booking>, tokio::task::JoinHandle<()>) {
    let mut next = 0;
    let (actor, client) = TableActor::<Booking>::new(10, move || {
        next += 1;
        next
    });
    (client, tokio::spawn(actor.run(())))
}

// --- Tests ---

#[tokio::test]
async fn test_table_full_lifecycle() {
    let (client, handle) = start();

    // 1. Insert assigns keys in order
    let first = client.insert(booking("ada", 101, 2)).await.unwrap();
    let second = client.insert(booking("ada", 102, 1)).await.unwrap();
    let other = client.insert(booking("grace", 103, 4)).await.unwrap();
    assert_eq!((first.id, second.id, other.id), (1, 2, 3));

    // 2. Select keeps insertion order
    let ada = client
        .select(BookingFilter::Guest("ada".into()))
        .await
        .unwrap();
    assert_eq!(ada, vec![first.clone(), second.clone()]);

    // 3. Update returns the new state
    let updated = client
        .update(first.id, BookingPatch { nights: 5 })
        .await
        .unwrap();
    assert_eq!(updated.nights, 5);

    // 4. Delete
    client.delete(second.id).await.unwrap();
    assert!(client.get(second.id).await.unwrap().is_none());

    // 5. DeleteWhere counts what it removed
    let removed = client
        .delete_where(BookingFilter::Guest("ada".into()))
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(client.get(other.id).await.unwrap(), Some(other));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_unique_constraint_rejects_duplicate() {
    let (client, _handle) = start();

    client.insert(booking("ada", 101, 1)).await.unwrap();
    let result = client.insert(booking("grace", 101, 3)).await;
    assert!(matches!(result, Err(TableError::Conflict(_))));

    let room = client.select(BookingFilter::Room(101)).await.unwrap();
    assert_eq!(room.len(), 1);
    assert_eq!(room[0].guest, "ada");
}

#[tokio::test]
async fn test_rejected_writes_leave_rows_untouched() {
    let (client, _handle) = start();

    let result = client.insert(booking("ada", 101, 0)).await;
    assert!(matches!(result, Err(TableError::Rejected(_))));

    let stored = client.insert(booking("ada", 101, 2)).await.unwrap();
    let result = client.update(stored.id, BookingPatch { nights: 0 }).await;
    assert!(matches!(result, Err(TableError::Rejected(_))));
    assert_eq!(client.get(stored.id).await.unwrap().unwrap().nights, 2);
}

#[tokio::test]
async fn test_missing_rows_report_not_found() {
    let (client, _handle) = start();

    assert!(matches!(
        client.update(42, BookingPatch { nights: 1 }).await,
        Err(TableError::NotFound(id)) if id == "42"
    ));
    assert!(matches!(
        client.delete(42).await,
        Err(TableError::NotFound(_))
    ));
    assert_eq!(
        client
            .delete_where(BookingFilter::Guest("nobody".into()))
            .await
            .unwrap(),
        0
    );
}
