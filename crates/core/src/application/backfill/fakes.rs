// In-memory port implementations for unit tests

use crate::domain::{Booking, BookingId, Farmer, FarmerId, RegistrationNo};
use crate::error::{AppError, Result};
use crate::port::{BookingRepository, FarmerRepository, RegistrationIndex};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Farmers kept in insertion order (scan order)
#[derive(Default)]
pub struct InMemoryFarmers {
    rows: Mutex<Vec<Farmer>>,
    failing: Mutex<HashSet<FarmerId>>,
    reads_fail: AtomicBool,
}

impl InMemoryFarmers {
    pub fn with(farmers: Vec<Farmer>) -> Self {
        Self {
            rows: Mutex::new(farmers),
            ..Default::default()
        }
    }

    pub fn fail_reads(&self) {
        self.reads_fail.store(true, Ordering::SeqCst);
    }

    pub fn get(&self, id: &str) -> Option<Farmer> {
        self.rows.lock().unwrap().iter().find(|f| f.id == id).cloned()
    }

    pub fn fail_updates_for(&self, id: &str) {
        self.failing.lock().unwrap().insert(id.to_string());
    }
}

#[async_trait]
impl FarmerRepository for InMemoryFarmers {
    async fn insert(&self, farmer: &Farmer) -> Result<()> {
        self.rows.lock().unwrap().push(farmer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &FarmerId) -> Result<Option<Farmer>> {
        Ok(self.get(id))
    }

    async fn find_all(&self) -> Result<Vec<Farmer>> {
        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(AppError::Database("no such table: farmers".to_string()));
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn set_registration_no(
        &self,
        id: &FarmerId,
        registration_no: &RegistrationNo,
        updated_at: i64,
    ) -> Result<()> {
        if self.failing.lock().unwrap().contains(id) {
            return Err(AppError::Database(format!("write rejected for {}", id)));
        }
        let mut rows = self.rows.lock().unwrap();
        let farmer = rows
            .iter_mut()
            .find(|f| &f.id == id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;
        farmer.registration_no = Some(registration_no.to_string());
        farmer.updated_at = updated_at;
        Ok(())
    }
}

/// Bookings kept in insertion order (scan order)
#[derive(Default)]
pub struct InMemoryBookings {
    rows: Mutex<Vec<Booking>>,
    failing: Mutex<HashSet<BookingId>>,
    reads_fail: AtomicBool,
}

impl InMemoryBookings {
    pub fn with(bookings: Vec<Booking>) -> Self {
        Self {
            rows: Mutex::new(bookings),
            ..Default::default()
        }
    }

    pub fn fail_updates_for(&self, id: &str) {
        self.failing.lock().unwrap().insert(id.to_string());
    }

    pub fn fail_reads(&self) {
        self.reads_fail.store(true, Ordering::SeqCst);
    }

    pub fn get(&self, id: &str) -> Option<Booking> {
        self.rows.lock().unwrap().iter().find(|b| b.id == id).cloned()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookings {
    async fn insert(&self, booking: &Booking) -> Result<()> {
        self.rows.lock().unwrap().push(booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>> {
        Ok(self.get(id))
    }

    async fn find_all(&self) -> Result<Vec<Booking>> {
        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(AppError::Database("no such table: bookings".to_string()));
        }
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn set_farmer_registration_no(
        &self,
        id: &BookingId,
        registration_no: &str,
        updated_at: i64,
    ) -> Result<()> {
        if self.failing.lock().unwrap().contains(id) {
            return Err(AppError::Database(format!("write rejected for {}", id)));
        }
        let mut rows = self.rows.lock().unwrap();
        let booking = rows
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| AppError::NotFound(id.clone()))?;
        booking.farmer_registration_no = Some(registration_no.to_string());
        booking.updated_at = updated_at;
        Ok(())
    }
}

/// Index stub with a fixed outcome
pub struct StubIndex {
    failure: Option<String>,
}

impl StubIndex {
    pub fn succeeding() -> Self {
        Self { failure: None }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
        }
    }
}

#[async_trait]
impl RegistrationIndex for StubIndex {
    fn index_name(&self) -> &str {
        "stub_registration_no"
    }

    async fn ensure_unique(&self) -> Result<()> {
        match &self.failure {
            Some(reason) => Err(AppError::Conflict(reason.clone())),
            None => Ok(()),
        }
    }
}
