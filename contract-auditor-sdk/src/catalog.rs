//! Static guidance for the findings the analysis service reports
//!
//! Results only carry a name and a one-line description. The catalog maps
//! well-known names to a longer explanation, a mitigation and a reference
//! link. Names the catalog does not know simply have no guidance.

use serde::Serialize;

/// Guidance shown next to a reported vulnerability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VulnerabilityInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub mitigation: &'static str,
    pub reference: &'static str,
}

/// Finding kinds the analysis service is known to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownVulnerability {
    Reentrancy,
    UncheckedExternalCall,
    TxOrigin,
    UnprotectedSelfdestruct,
    TimestampDependence,
    FrontRunning,
    DosWithUnexpectedRevert,
    WeakRandomness,
    IncorrectErc20,
    IncorrectErc721,
    CrossContractReentrancy,
    StateChangeAfterExternalCall,
    UnusedReturnValue,
    AccessControl,
    EtherLeak,
    DelegatecallUsage,
    UncheckedSend,
    AssemblyUsage,
    UninitializedStateVariable,
    DeprecatedFunction,
    CompilationError,
}

impl KnownVulnerability {
    pub const ALL: [KnownVulnerability; 21] = [
        KnownVulnerability::Reentrancy,
        KnownVulnerability::UncheckedExternalCall,
        KnownVulnerability::TxOrigin,
        KnownVulnerability::UnprotectedSelfdestruct,
        KnownVulnerability::TimestampDependence,
        KnownVulnerability::FrontRunning,
        KnownVulnerability::DosWithUnexpectedRevert,
        KnownVulnerability::WeakRandomness,
        KnownVulnerability::IncorrectErc20,
        KnownVulnerability::IncorrectErc721,
        KnownVulnerability::CrossContractReentrancy,
        KnownVulnerability::StateChangeAfterExternalCall,
        KnownVulnerability::UnusedReturnValue,
        KnownVulnerability::AccessControl,
        KnownVulnerability::EtherLeak,
        KnownVulnerability::DelegatecallUsage,
        KnownVulnerability::UncheckedSend,
        KnownVulnerability::AssemblyUsage,
        KnownVulnerability::UninitializedStateVariable,
        KnownVulnerability::DeprecatedFunction,
        KnownVulnerability::CompilationError,
    ];

    /// Name as reported by the service
    pub fn name(&self) -> &'static str {
        match self {
            KnownVulnerability::Reentrancy => "Potential Reentrancy",
            KnownVulnerability::UncheckedExternalCall => "Unchecked External Call",
            KnownVulnerability::TxOrigin => "Use of tx.origin",
            KnownVulnerability::UnprotectedSelfdestruct => "Unprotected Selfdestruct",
            KnownVulnerability::TimestampDependence => "Timestamp Dependence",
            KnownVulnerability::FrontRunning => "Potential Front-Running Vulnerability",
            KnownVulnerability::DosWithUnexpectedRevert => "Potential DoS with Unexpected Revert",
            KnownVulnerability::WeakRandomness => "Weak Source of Randomness",
            KnownVulnerability::IncorrectErc20 => "Incorrect ERC20 Implementation",
            KnownVulnerability::IncorrectErc721 => "Incorrect ERC721 Implementation",
            KnownVulnerability::CrossContractReentrancy => "Potential Cross-Contract Reentrancy",
            KnownVulnerability::StateChangeAfterExternalCall => "State Change After External Call",
            KnownVulnerability::UnusedReturnValue => "Unused Return Value",
            KnownVulnerability::AccessControl => "Potential Access Control Issue",
            KnownVulnerability::EtherLeak => "Potential Ether Leak",
            KnownVulnerability::DelegatecallUsage => "Delegatecall Usage",
            KnownVulnerability::UncheckedSend => "Unchecked Send",
            KnownVulnerability::AssemblyUsage => "Assembly Usage",
            KnownVulnerability::UninitializedStateVariable => "Uninitialized State Variable",
            KnownVulnerability::DeprecatedFunction => "Deprecated Function",
            KnownVulnerability::CompilationError => "Compilation Error",
        }
    }

    /// Resolve a reported name, ignoring case and surrounding whitespace.
    ///
    /// Deprecated-function findings carry the function in their name
    /// (`Deprecated Function: sha3`) and are matched by prefix.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        if normalized.starts_with("deprecated function") {
            return Some(KnownVulnerability::DeprecatedFunction);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().to_ascii_lowercase() == normalized)
    }

    pub fn info(&self) -> &'static VulnerabilityInfo {
        match self {
            KnownVulnerability::Reentrancy => &VulnerabilityInfo {
                title: "Reentrancy",
                description: "An external call hands control to another contract before this contract has finished updating its state. The callee can re-enter and observe or exploit the stale state, for example to withdraw the same balance repeatedly.",
                mitigation: "Apply checks-effects-interactions: update state before external calls. Guard sensitive functions with a reentrancy lock such as OpenZeppelin's ReentrancyGuard or Vyper's @nonreentrant.",
                reference: "https://swcregistry.io/docs/SWC-107",
            },
            KnownVulnerability::UncheckedExternalCall => &VulnerabilityInfo {
                title: "Unchecked External Call",
                description: "A low-level call (call, send, delegatecall) returns false on failure instead of reverting. Ignoring the return value lets execution continue as if the call had succeeded.",
                mitigation: "Check the boolean returned by every low-level call and revert on failure, or use higher-level calls that revert automatically.",
                reference: "https://swcregistry.io/docs/SWC-104",
            },
            KnownVulnerability::TxOrigin => &VulnerabilityInfo {
                title: "Authorization through tx.origin",
                description: "tx.origin is the externally owned account that started the transaction. A malicious contract called by the owner can pass a tx.origin check and act with the owner's authority.",
                mitigation: "Use msg.sender for authorization checks.",
                reference: "https://swcregistry.io/docs/SWC-115",
            },
            KnownVulnerability::UnprotectedSelfdestruct => &VulnerabilityInfo {
                title: "Unprotected Selfdestruct",
                description: "A function that can destroy the contract is reachable without access control, so anyone can remove the contract and send its ether to an address of their choice.",
                mitigation: "Restrict selfdestruct to authorized roles, preferably behind a multisig, or remove it entirely.",
                reference: "https://swcregistry.io/docs/SWC-106",
            },
            KnownVulnerability::TimestampDependence => &VulnerabilityInfo {
                title: "Block Timestamp Dependence",
                description: "block.timestamp is set by the block producer and can be shifted within protocol tolerances. Logic that depends on exact timestamps can be nudged in the producer's favor.",
                mitigation: "Do not use timestamps for randomness or tight deadlines. Tolerate drift of several seconds in time-based logic.",
                reference: "https://swcregistry.io/docs/SWC-116",
            },
            KnownVulnerability::FrontRunning => &VulnerabilityInfo {
                title: "Transaction Order Dependence",
                description: "Pending transactions are visible in the mempool. An observer can submit a competing transaction with a higher fee so it executes first, for example to take a reward or move a price.",
                mitigation: "Use commit-reveal schemes, slippage bounds or batch auctions so that transaction ordering cannot be profitably exploited.",
                reference: "https://swcregistry.io/docs/SWC-114",
            },
            KnownVulnerability::DosWithUnexpectedRevert => &VulnerabilityInfo {
                title: "Denial of Service with Failed Call",
                description: "A require or assert that depends on an external call lets the callee block the function forever by reverting, for example by refusing to accept a refund.",
                mitigation: "Favor pull over push payments and isolate each external call so that one failing recipient cannot block the others.",
                reference: "https://swcregistry.io/docs/SWC-113",
            },
            KnownVulnerability::WeakRandomness => &VulnerabilityInfo {
                title: "Weak Source of Randomness",
                description: "Values such as block.timestamp, block.difficulty or blockhash are known to or influenced by block producers, so randomness derived from them is predictable.",
                mitigation: "Use a verifiable randomness source such as an oracle VRF or a commit-reveal scheme.",
                reference: "https://swcregistry.io/docs/SWC-120",
            },
            KnownVulnerability::IncorrectErc20 => &VulnerabilityInfo {
                title: "Incorrect ERC20 Interface",
                description: "The contract presents itself as an ERC20 token but its functions or return values deviate from the standard, which breaks wallets and protocols that integrate with it.",
                mitigation: "Match the EIP-20 signatures and return values exactly, or build on an audited implementation.",
                reference: "https://eips.ethereum.org/EIPS/eip-20",
            },
            KnownVulnerability::IncorrectErc721 => &VulnerabilityInfo {
                title: "Incorrect ERC721 Interface",
                description: "The contract presents itself as an ERC721 token but does not comply with the standard interface, so marketplaces and wallets may mishandle its tokens.",
                mitigation: "Match the EIP-721 interface, including ERC165 support, or build on an audited implementation.",
                reference: "https://eips.ethereum.org/EIPS/eip-721",
            },
            KnownVulnerability::CrossContractReentrancy => &VulnerabilityInfo {
                title: "Cross-Contract Reentrancy",
                description: "A payable call into another contract that itself exposes payable entry points can be used to re-enter this system through a different contract sharing the same state.",
                mitigation: "Finish all state updates before calling out and use a reentrancy lock shared by every contract that touches the same state.",
                reference: "https://swcregistry.io/docs/SWC-107",
            },
            KnownVulnerability::StateChangeAfterExternalCall => &VulnerabilityInfo {
                title: "State Change After External Call",
                description: "State is written after an external call returns. During the call the callee sees outdated state, which is the classic precondition for reentrancy.",
                mitigation: "Move state writes before the external call (checks-effects-interactions).",
                reference: "https://swcregistry.io/docs/SWC-107",
            },
            KnownVulnerability::UnusedReturnValue => &VulnerabilityInfo {
                title: "Unused Return Value",
                description: "The return value of an external call is ignored. Failures reported through return values, such as ERC20 transfer returning false, go unnoticed.",
                mitigation: "Check every return value, or use wrappers such as SafeERC20 that revert on failure.",
                reference: "https://swcregistry.io/docs/SWC-104",
            },
            KnownVulnerability::AccessControl => &VulnerabilityInfo {
                title: "Missing Access Control",
                description: "An unprotected function calls a function that is protected elsewhere, exposing privileged behavior to any caller.",
                mitigation: "Apply the same access modifiers on every path that reaches privileged functionality.",
                reference: "https://swcregistry.io/docs/SWC-105",
            },
            KnownVulnerability::EtherLeak => &VulnerabilityInfo {
                title: "Ether Transfer to Another Contract",
                description: "The function forwards ether to another contract. If the target or the amount can be influenced by an attacker, funds can be drained.",
                mitigation: "Make sure the recipient and amount cannot be controlled by untrusted callers and restrict the function to authorized roles.",
                reference: "https://swcregistry.io/docs/SWC-105",
            },
            KnownVulnerability::DelegatecallUsage => &VulnerabilityInfo {
                title: "Delegatecall to Untrusted Callee",
                description: "delegatecall runs foreign code in the context of this contract's storage and balance. A malicious or mismatched target can overwrite storage or take ownership.",
                mitigation: "Only delegatecall into trusted, immutable implementations with a compatible storage layout.",
                reference: "https://swcregistry.io/docs/SWC-112",
            },
            KnownVulnerability::UncheckedSend => &VulnerabilityInfo {
                title: "Unchecked Send",
                description: "send() returns false when the transfer fails. Without checking it the contract continues as though the payment went through.",
                mitigation: "Assert on the result of send() or use a transfer mechanism that reverts on failure.",
                reference: "https://swcregistry.io/docs/SWC-104",
            },
            KnownVulnerability::AssemblyUsage => &VulnerabilityInfo {
                title: "Inline Assembly",
                description: "Inline assembly bypasses compiler safety checks such as bounds checking and type safety, which makes mistakes easier to introduce and harder to spot.",
                mitigation: "Avoid assembly where high-level code suffices and review any remaining blocks carefully.",
                reference: "https://docs.soliditylang.org/en/latest/assembly.html",
            },
            KnownVulnerability::UninitializedStateVariable => &VulnerabilityInfo {
                title: "Uninitialized State Variable",
                description: "A state variable is never assigned in the constructor and keeps its zero value, which can leave ownership or configuration unset.",
                mitigation: "Initialize every state variable explicitly in the constructor or at declaration.",
                reference: "https://swcregistry.io/docs/SWC-109",
            },
            KnownVulnerability::DeprecatedFunction => &VulnerabilityInfo {
                title: "Deprecated Function",
                description: "The contract calls a function that has been deprecated (for example sha3 or suicide). Deprecated builtins may be removed or behave differently in newer compilers.",
                mitigation: "Replace the call with its recommended alternative (keccak256, selfdestruct, ...).",
                reference: "https://swcregistry.io/docs/SWC-111",
            },
            KnownVulnerability::CompilationError => &VulnerabilityInfo {
                title: "Compilation Error",
                description: "The analysis service could not compile the source, so no further checks were run.",
                mitigation: "Fix the reported compiler error and submit the contract again.",
                reference: "https://docs.vyperlang.org/en/stable/compiling-a-contract.html",
            },
        }
    }
}

/// Guidance for a reported vulnerability name; `None` means no info available
pub fn lookup(name: &str) -> Option<&'static VulnerabilityInfo> {
    KnownVulnerability::from_name(name).map(|kind| kind.info())
}
