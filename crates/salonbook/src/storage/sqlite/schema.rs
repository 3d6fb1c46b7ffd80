//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Dates are stored as `YYYY-MM-DD`, times of day as
//! `HH:MM` and timestamps as RFC 3339, so text ordering matches time ordering.
//! List-valued columns (`slots`, `prestation_ids`, `reference_urls`) hold JSON.

/// Pragmas applied to every new connection.
pub const PRAGMAS: &str = r#"
PRAGMA foreign_keys = ON;
"#;

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Salons table
CREATE TABLE IF NOT EXISTS salons (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    address TEXT NOT NULL,
    phone TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Service categories table
CREATE TABLE IF NOT EXISTS services (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    kind TEXT NOT NULL,
    position INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Prestations table
CREATE TABLE IF NOT EXISTS prestations (
    id TEXT PRIMARY KEY,
    service_id TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    price_cents INTEGER NOT NULL,
    duration_minutes INTEGER NOT NULL,
    active INTEGER NOT NULL DEFAULT 1,
    image_url TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (service_id) REFERENCES services(id) ON DELETE CASCADE
);

-- Opening hours table, one row per salon and date
CREATE TABLE IF NOT EXISTS opening_hours (
    id TEXT PRIMARY KEY,
    salon_id TEXT NOT NULL,
    date TEXT NOT NULL,
    is_closed INTEGER NOT NULL,
    slots TEXT NOT NULL,
    note TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE (salon_id, date),
    FOREIGN KEY (salon_id) REFERENCES salons(id) ON DELETE CASCADE
);

-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone TEXT,
    role TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Reservations table
CREATE TABLE IF NOT EXISTS reservations (
    id TEXT PRIMARY KEY,
    salon_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    prestation_ids TEXT NOT NULL,
    date TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    status TEXT NOT NULL,
    total_price_cents INTEGER NOT NULL,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (salon_id) REFERENCES salons(id),
    FOREIGN KEY (user_id) REFERENCES users(id)
);

-- Custom tattoo requests table
CREATE TABLE IF NOT EXISTS tattoo_requests (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    salon_id TEXT,
    description TEXT NOT NULL,
    placement TEXT NOT NULL,
    size_cm INTEGER,
    style TEXT,
    budget_cents INTEGER,
    reference_urls TEXT NOT NULL,
    status TEXT NOT NULL,
    admin_notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id)
);

-- Flash tattoo requests table
CREATE TABLE IF NOT EXISTS flash_tattoo_requests (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    prestation_id TEXT NOT NULL,
    placement TEXT NOT NULL,
    preferred_date TEXT,
    status TEXT NOT NULL,
    admin_notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id)
);

-- Reviews table
CREATE TABLE IF NOT EXISTS reviews (
    id TEXT PRIMARY KEY,
    author_name TEXT NOT NULL,
    rating INTEGER NOT NULL,
    comment TEXT NOT NULL,
    published INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_prestations_service_id ON prestations(service_id);
CREATE INDEX IF NOT EXISTS idx_opening_hours_date ON opening_hours(date);
CREATE INDEX IF NOT EXISTS idx_reservations_salon_date ON reservations(salon_id, date);
CREATE INDEX IF NOT EXISTS idx_reservations_user_id ON reservations(user_id);
CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
"#;

// Salon queries
pub const INSERT_SALON: &str = r#"
INSERT INTO salons (id, name, slug, address, phone, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_SALONS: &str = r#"
SELECT id, name, slug, address, phone, created_at, updated_at
FROM salons
ORDER BY name ASC
"#;

pub const SELECT_SALON_BY_ID: &str = r#"
SELECT id, name, slug, address, phone, created_at, updated_at
FROM salons
WHERE id = ?1
"#;

pub const UPDATE_SALON: &str = r#"
UPDATE salons
SET name = ?2, slug = ?3, address = ?4, phone = ?5, updated_at = ?6
WHERE id = ?1
"#;

// Service queries
pub const INSERT_SERVICE: &str = r#"
INSERT INTO services (id, name, description, kind, position, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_SERVICES: &str = r#"
SELECT id, name, description, kind, position, created_at, updated_at
FROM services
ORDER BY position ASC, name ASC
"#;

pub const SELECT_SERVICE_BY_ID: &str = r#"
SELECT id, name, description, kind, position, created_at, updated_at
FROM services
WHERE id = ?1
"#;

pub const UPDATE_SERVICE: &str = r#"
UPDATE services
SET name = ?2, description = ?3, kind = ?4, position = ?5, updated_at = ?6
WHERE id = ?1
"#;

pub const DELETE_SERVICE: &str = r#"
DELETE FROM services
WHERE id = ?1
"#;

// Prestation queries
pub const INSERT_PRESTATION: &str = r#"
INSERT INTO prestations (id, service_id, name, description, price_cents, duration_minutes, active, image_url, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
"#;

pub const SELECT_PRESTATIONS: &str = r#"
SELECT id, service_id, name, description, price_cents, duration_minutes, active, image_url, created_at, updated_at
FROM prestations
ORDER BY name ASC
"#;

pub const SELECT_PRESTATIONS_BY_SERVICE: &str = r#"
SELECT id, service_id, name, description, price_cents, duration_minutes, active, image_url, created_at, updated_at
FROM prestations
WHERE service_id = ?1
ORDER BY price_cents ASC, name ASC
"#;

pub const SELECT_PRESTATION_BY_ID: &str = r#"
SELECT id, service_id, name, description, price_cents, duration_minutes, active, image_url, created_at, updated_at
FROM prestations
WHERE id = ?1
"#;

pub const UPDATE_PRESTATION: &str = r#"
UPDATE prestations
SET service_id = ?2, name = ?3, description = ?4, price_cents = ?5, duration_minutes = ?6, active = ?7, image_url = ?8, updated_at = ?9
WHERE id = ?1
"#;

pub const DELETE_PRESTATION: &str = r#"
DELETE FROM prestations
WHERE id = ?1
"#;

// Opening hours queries
pub const UPSERT_OPENING_HOURS: &str = r#"
INSERT INTO opening_hours (id, salon_id, date, is_closed, slots, note, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
ON CONFLICT (salon_id, date) DO UPDATE SET
    is_closed = excluded.is_closed,
    slots = excluded.slots,
    note = excluded.note,
    updated_at = excluded.updated_at
"#;

pub const SELECT_OPENING_HOURS_BY_ID: &str = r#"
SELECT id, salon_id, date, is_closed, slots, note, created_at, updated_at
FROM opening_hours
WHERE id = ?1
"#;

pub const SELECT_OPENING_HOURS_FOR_DAY: &str = r#"
SELECT id, salon_id, date, is_closed, slots, note, created_at, updated_at
FROM opening_hours
WHERE salon_id = ?1 AND date = ?2
"#;

pub const SELECT_OPENING_HOURS_IN_RANGE: &str = r#"
SELECT id, salon_id, date, is_closed, slots, note, created_at, updated_at
FROM opening_hours
WHERE (?1 IS NULL OR salon_id = ?1) AND date >= ?2 AND date <= ?3
ORDER BY date ASC, salon_id ASC
"#;

pub const DELETE_OPENING_HOURS: &str = r#"
DELETE FROM opening_hours
WHERE id = ?1
"#;

// Reservation queries
pub const INSERT_RESERVATION: &str = r#"
INSERT INTO reservations (id, salon_id, user_id, prestation_ids, date, start_time, end_time, status, total_price_cents, notes, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
"#;

pub const SELECT_RESERVATION_BY_ID: &str = r#"
SELECT id, salon_id, user_id, prestation_ids, date, start_time, end_time, status, total_price_cents, notes, created_at, updated_at
FROM reservations
WHERE id = ?1
"#;

/// Every filter parameter is optional: NULL disables it.
pub const SELECT_RESERVATIONS_FILTERED: &str = r#"
SELECT id, salon_id, user_id, prestation_ids, date, start_time, end_time, status, total_price_cents, notes, created_at, updated_at
FROM reservations
WHERE (?1 IS NULL OR salon_id = ?1)
  AND (?2 IS NULL OR user_id = ?2)
  AND (?3 IS NULL OR date >= ?3)
  AND (?4 IS NULL OR date <= ?4)
  AND (?5 IS NULL OR status = ?5)
ORDER BY date ASC, start_time ASC
"#;

pub const UPDATE_RESERVATION: &str = r#"
UPDATE reservations
SET prestation_ids = ?2, date = ?3, start_time = ?4, end_time = ?5, status = ?6, total_price_cents = ?7, notes = ?8, updated_at = ?9
WHERE id = ?1
"#;

pub const DELETE_RESERVATION: &str = r#"
DELETE FROM reservations
WHERE id = ?1
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (id, name, email, phone, role, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_USERS: &str = r#"
SELECT id, name, email, phone, role, created_at, updated_at
FROM users
ORDER BY name ASC
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, name, email, phone, role, created_at, updated_at
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, name, email, phone, role, created_at, updated_at
FROM users
WHERE email = ?1
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET name = ?2, email = ?3, phone = ?4, role = ?5, updated_at = ?6
WHERE id = ?1
"#;

// Tattoo request queries
pub const INSERT_TATTOO_REQUEST: &str = r#"
INSERT INTO tattoo_requests (id, user_id, salon_id, description, placement, size_cm, style, budget_cents, reference_urls, status, admin_notes, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
"#;

pub const SELECT_TATTOO_REQUESTS: &str = r#"
SELECT id, user_id, salon_id, description, placement, size_cm, style, budget_cents, reference_urls, status, admin_notes, created_at, updated_at
FROM tattoo_requests
ORDER BY created_at DESC
"#;

pub const SELECT_TATTOO_REQUEST_BY_ID: &str = r#"
SELECT id, user_id, salon_id, description, placement, size_cm, style, budget_cents, reference_urls, status, admin_notes, created_at, updated_at
FROM tattoo_requests
WHERE id = ?1
"#;

pub const UPDATE_TATTOO_REQUEST: &str = r#"
UPDATE tattoo_requests
SET status = ?2, admin_notes = ?3, updated_at = ?4
WHERE id = ?1
"#;

pub const DELETE_TATTOO_REQUEST: &str = r#"
DELETE FROM tattoo_requests
WHERE id = ?1
"#;

// Flash tattoo request queries
pub const INSERT_FLASH_REQUEST: &str = r#"
INSERT INTO flash_tattoo_requests (id, user_id, prestation_id, placement, preferred_date, status, admin_notes, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

pub const SELECT_FLASH_REQUESTS: &str = r#"
SELECT id, user_id, prestation_id, placement, preferred_date, status, admin_notes, created_at, updated_at
FROM flash_tattoo_requests
ORDER BY created_at DESC
"#;

pub const SELECT_FLASH_REQUEST_BY_ID: &str = r#"
SELECT id, user_id, prestation_id, placement, preferred_date, status, admin_notes, created_at, updated_at
FROM flash_tattoo_requests
WHERE id = ?1
"#;

pub const UPDATE_FLASH_REQUEST: &str = r#"
UPDATE flash_tattoo_requests
SET status = ?2, admin_notes = ?3, updated_at = ?4
WHERE id = ?1
"#;

pub const DELETE_FLASH_REQUEST: &str = r#"
DELETE FROM flash_tattoo_requests
WHERE id = ?1
"#;

// Review queries
pub const INSERT_REVIEW: &str = r#"
INSERT INTO reviews (id, author_name, rating, comment, published, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_REVIEWS: &str = r#"
SELECT id, author_name, rating, comment, published, created_at, updated_at
FROM reviews
WHERE (?1 = 0 OR published = 1)
ORDER BY created_at DESC
"#;

pub const SELECT_REVIEW_BY_ID: &str = r#"
SELECT id, author_name, rating, comment, published, created_at, updated_at
FROM reviews
WHERE id = ?1
"#;

pub const UPDATE_REVIEW: &str = r#"
UPDATE reviews
SET comment = ?2, published = ?3, updated_at = ?4
WHERE id = ?1
"#;

pub const DELETE_REVIEW: &str = r#"
DELETE FROM reviews
WHERE id = ?1
"#;
