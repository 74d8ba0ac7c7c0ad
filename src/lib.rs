// exchange-core: two-asset constant-product exchange + leveraged margin ledger.
// accounting-first architecture: every public operation validates fully, then
// mutates, then emits its records. all arithmetic is exact integer fixed point
// with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Address, Amount, Price, Leverage, Side, Timestamp
//   2.x  math.rs: 256-bit-intermediate mul_div
//   3.x  token.rs: fungible-token collaborator trait + in-memory bank
//   4.x  events.rs: state-change records and the collector
//   5.x  pool.rs: reserve pool: liquidity, swap pricing, reserve tracking
//   6.x  ledger.rs: margin ledger: deposits, leveraged positions
//        account.rs: per owner/token margin account
//        position.rs: immutable position records
//        price_feed.rs: oracle capability (mocked)

// core accounting modules
pub mod account;
pub mod events;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod position;
pub mod types;

// collaborator boundaries
pub mod price_feed;
pub mod token;

// re exports for convenience
pub use account::*;
pub use events::*;
pub use ledger::*;
pub use pool::*;
pub use position::*;
pub use types::*;
pub use price_feed::{MockPriceOracle, OracleError, PriceOracle, RoundData};
pub use token::{InMemoryTokenLedger, TokenError, TokenLedger};
