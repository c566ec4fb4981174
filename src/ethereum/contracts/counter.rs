//! Counter contract bindings.
//!
//! The creation code is hand-assembled: an 11-byte constructor that returns a
//! 52-byte runtime dispatching `count()` (SLOAD slot 0) and `increment()`
//! (slot 0 += 1). Any other selector reverts.

use alloy::sol;

sol! {
    #[sol(
        bytecode = "603480600b6000396000f360003560e01c806306661abd14601d5763d09de08a14602957600080fd5b60005460005260206000f35b60005460010160005500"
    )]
    contract Counter {
        uint256 public count;

        function increment() public {
            count++;
        }
    }
}
