use time::Time;

/// Staff member stored in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntity {
    /// Primary key assigned by the store.
    pub id: i32,
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Login identifier, unique across users.
    pub email: String,
    /// Lowercase hex SHA-256 digest of the password.
    pub password_hash: String,
}

/// User row about to be inserted; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserEntity {
    /// Given name.
    pub firstname: String,
    /// Family name.
    pub lastname: String,
    /// Login identifier.
    pub email: String,
    /// Digest from `auth_service::hash_password`.
    pub password_hash: String,
}

impl NewUserEntity {
    /// Attach the identifier chosen by the store.
    pub fn with_id(self, id: i32) -> UserEntity {
        UserEntity {
            id,
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}

/// Weekly shift of a user stored in the `schedules` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntity {
    /// Primary key assigned by the store.
    pub id: i32,
    /// Owner of the shift, references `users.id`.
    pub user_id: i32,
    /// Day of the week, 1 (Monday) through 7 (Sunday).
    pub day: i16,
    /// Start of the shift.
    pub start_at: Time,
    /// End of the shift, after `start_at`.
    pub end_at: Time,
}

/// Schedule row about to be inserted; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScheduleEntity {
    /// Owner of the shift.
    pub user_id: i32,
    /// Day of the week, 1 (Monday) through 7 (Sunday).
    pub day: i16,
    /// Start of the shift.
    pub start_at: Time,
    /// End of the shift.
    pub end_at: Time,
}

impl NewScheduleEntity {
    /// Attach the identifier chosen by the store.
    pub fn with_id(self, id: i32) -> ScheduleEntity {
        ScheduleEntity {
            id,
            user_id: self.user_id,
            day: self.day,
            start_at: self.start_at,
            end_at: self.end_at,
        }
    }
}
