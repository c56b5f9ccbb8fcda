use soroban_sdk::contracttype;

/// Error categories used by callers to decide how to react to a failure.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Malformed input: zero values, empty strings, out-of-range ids.
    Validation = 1,
    /// Level supply limits; may succeed once capacity changes.
    Capacity = 2,
    /// Caller identity lacks the required role or ownership.
    Authorization = 3,
    /// Ledger state does not allow the operation; re-read before retrying.
    StatePrecondition = 4,
    /// Caller funds or approvals are short; top up and retry.
    Resource = 5,
    /// Contract-level conditions such as pausing or versioning.
    System = 6,
}

/// Contract errors.
///
/// # Code ranges
/// | Range   | Purpose                 |
/// |---------|-------------------------|
/// | 1 – 9   | Lifecycle / gate        |
/// | 10 – 19 | Authorization           |
/// | 20 – 39 | Validation              |
/// | 40 – 49 | Capacity                |
/// | 50 – 69 | State precondition      |
/// | 70 – 79 | Resource                |
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    // ── Lifecycle / gate (1–9) ───────────────────────────────
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Paused = 3,
    FeatureNotEnabled = 4,
    VersionMismatch = 5,

    // ── Authorization (10–19) ────────────────────────────────
    UnauthorizedCaller = 10,
    MissingRole = 11,
    NotOwner = 12,
    NotTokenManagerOrOwner = 13,
    NotWhitelisted = 14,

    // ── Validation (20–39) ───────────────────────────────────
    InvalidInput = 20,
    EmptyName = 21,
    ValueCannotBeZero = 22,
    LevelNotFound = 23,
    TokenNotFound = 24,
    InvalidLevelId = 25,
    InvalidTokenId = 26,
    BatchLengthMismatch = 27,
    EmptyBatch = 28,
    SelfManager = 29,
    ValidatorNotFound = 30,
    BlockInFuture = 31,

    // ── Capacity (40–49) ─────────────────────────────────────
    LevelCapReached = 40,
    CirculatingSupplyGreaterThanCap = 41,

    // ── State precondition (50–69) ───────────────────────────
    MaturityPeriodEnded = 50,
    TokenNotEligible = 51,
    TokenNotReadyForMigration = 52,
    AlreadyMigrated = 53,
    CannotMintXToken = 54,
    NoTokenManager = 55,
    WhitelistEntryNotFound = 56,
    AlreadyDelegated = 57,
    NotDelegated = 58,
    AlreadySeeded = 59,
    ValidatorHasDelegations = 60,

    // ── Resource (70–79) ─────────────────────────────────────
    InsufficientBalance = 70,
    InsufficientAllowance = 71,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::Paused
            | ContractError::FeatureNotEnabled
            | ContractError::VersionMismatch => ErrorCategory::System,
            ContractError::UnauthorizedCaller
            | ContractError::MissingRole
            | ContractError::NotOwner
            | ContractError::NotTokenManagerOrOwner
            | ContractError::NotWhitelisted => ErrorCategory::Authorization,
            ContractError::InvalidInput
            | ContractError::EmptyName
            | ContractError::ValueCannotBeZero
            | ContractError::LevelNotFound
            | ContractError::TokenNotFound
            | ContractError::InvalidLevelId
            | ContractError::InvalidTokenId
            | ContractError::BatchLengthMismatch
            | ContractError::EmptyBatch
            | ContractError::SelfManager
            | ContractError::ValidatorNotFound
            | ContractError::BlockInFuture => ErrorCategory::Validation,
            ContractError::LevelCapReached | ContractError::CirculatingSupplyGreaterThanCap => {
                ErrorCategory::Capacity
            }
            ContractError::MaturityPeriodEnded
            | ContractError::TokenNotEligible
            | ContractError::TokenNotReadyForMigration
            | ContractError::AlreadyMigrated
            | ContractError::CannotMintXToken
            | ContractError::NoTokenManager
            | ContractError::WhitelistEntryNotFound
            | ContractError::AlreadyDelegated
            | ContractError::NotDelegated
            | ContractError::AlreadySeeded
            | ContractError::ValidatorHasDelegations => ErrorCategory::StatePrecondition,
            ContractError::InsufficientBalance | ContractError::InsufficientAllowance => {
                ErrorCategory::Resource
            }
        }
    }

    /// Returns whether the same caller may retry without re-reading state.
    ///
    /// Capacity and resource errors clear once an external change happens
    /// (a cap raise, a top-up, a new approval). Everything else is either
    /// fatal for the caller or requires fresh state.
    pub fn retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Capacity | ErrorCategory::Resource
        )
    }
}
