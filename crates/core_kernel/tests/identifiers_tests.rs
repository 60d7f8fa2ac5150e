//! Unit tests for the typed identifiers

use core_kernel::{
    UserId, AccountId, RevenueId, ExpenseId, TransferId, InvestmentId,
    ClientId, DealId, GoalId, TaskId, HabitId, WaterLogId, ChannelId, ServiceId,
};
use uuid::Uuid;

mod generation {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(ClientId::new(), ClientId::new());
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = RevenueId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = RevenueId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_default_is_random() {
        assert_ne!(DealId::default(), DealId::default());
    }
}

mod display_and_parse {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert!(UserId::new().to_string().starts_with("USR-"));
        assert!(AccountId::new().to_string().starts_with("ACC-"));
        assert!(RevenueId::new().to_string().starts_with("REV-"));
        assert!(ExpenseId::new().to_string().starts_with("EXP-"));
        assert!(TransferId::new().to_string().starts_with("TRF-"));
        assert!(InvestmentId::new().to_string().starts_with("INV-"));
        assert!(ClientId::new().to_string().starts_with("CLI-"));
        assert!(DealId::new().to_string().starts_with("DEAL-"));
        assert!(GoalId::new().to_string().starts_with("GOAL-"));
        assert!(TaskId::new().to_string().starts_with("TASK-"));
        assert!(HabitId::new().to_string().starts_with("HAB-"));
        assert!(WaterLogId::new().to_string().starts_with("H2O-"));
        assert!(ChannelId::new().to_string().starts_with("CHN-"));
        assert!(ServiceId::new().to_string().starts_with("SRV-"));
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let uuid = Uuid::new_v4();
        let with_prefix: ClientId = format!("CLI-{}", uuid).parse().unwrap();
        let bare: ClientId = uuid.to_string().parse().unwrap();
        assert_eq!(with_prefix, bare);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("CLI-not-a-uuid".parse::<ClientId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let uuid = Uuid::new_v4();
        let id = GoalId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}
