//! Property tests for queue partitioning invariants.

use proptest::prelude::*;
use queueview_core::queue::{DOWNLOAD_CATEGORIES, UPLOAD_CATEGORIES, classify};
use queueview_core::{
    Category, DownloadRecord, FailureCode, Priority, Record, RequestCommon, RequestQueue,
    RequestState, StaticSource, UploadDirRecord, UploadFileRecord,
};
use queueview_mime::FilterRegistry;

fn arb_state() -> impl Strategy<Value = RequestState> {
    prop_oneof![
        Just(RequestState::Running),
        Just(RequestState::Succeeded),
        Just(RequestState::Failed),
    ]
}

fn arb_failure() -> impl Strategy<Value = Option<FailureCode>> {
    prop_oneof![
        Just(None),
        Just(Some(FailureCode::DataNotFound)),
        Just(Some(FailureCode::ContentValidationUnknownMime)),
        Just(Some(FailureCode::ContentValidationBadMime)),
        (0i32..100).prop_map(|n| Some(FailureCode::Other(n))),
    ]
}

fn arb_mime() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("text/plain; charset=utf-8".to_string()),
        Just("image/png".to_string()),
        Just("application/xyz".to_string()),
        Just(" video/unknown ;x=1".to_string()),
    ]
}

prop_compose! {
    fn arb_common()(
        id in "[a-z]{1,6}",
        priority in 0i16..=8,
        state in arb_state(),
    ) -> RequestCommon {
        RequestCommon {
            identifier: id,
            priority: Priority::new(priority),
            state,
            ..RequestCommon::default()
        }
    }
}

fn arb_size() -> impl Strategy<Value = Option<u64>> {
    proptest::option::of(0u64..10_000)
}

fn arb_record() -> impl Strategy<Value = Record> {
    prop_oneof![
        (
            arb_common(),
            arb_size(),
            arb_mime(),
            arb_failure(),
            any::<bool>()
        )
            .prop_map(|(common, data_size, mime_type, failure_code, to_temp_space)| {
                Record::from(DownloadRecord {
                    common,
                    data_size,
                    mime_type,
                    failure_code,
                    to_temp_space,
                    ..Default::default()
                })
            }),
        (arb_common(), arb_size(), arb_mime()).prop_map(|(common, data_size, mime_type)| {
            Record::from(UploadFileRecord {
                common,
                data_size,
                mime_type,
                ..Default::default()
            })
        }),
        (arb_common(), arb_size()).prop_map(|(common, total_data_size)| {
            Record::from(UploadDirRecord {
                common,
                total_data_size,
                ..Default::default()
            })
        }),
    ]
}

fn arb_mask() -> impl Strategy<Value = Category> {
    let all: Vec<Category> = DOWNLOAD_CATEGORIES
        .into_iter()
        .chain(UPLOAD_CATEGORIES)
        .collect();
    proptest::sample::subsequence(all, 0..=12).prop_map(|parts| {
        parts
            .into_iter()
            .fold(Category::NONE, |mask, category| mask | category)
    })
}

fn is_uncompleted(category: Category) -> bool {
    category == Category::DL_UC || category == Category::UP_UC || category == Category::UP_UC_DIR
}

proptest! {
    #[test]
    fn partitions_respect_mask_and_counts(
        records in proptest::collection::vec(arb_record(), 0..40),
        mask in arb_mask(),
    ) {
        let registry = FilterRegistry::builtin();
        let source = StaticSource::new(records.clone());
        let queue = RequestQueue::new(mask, &source).unwrap();

        let mut counted = 0;
        for (category, list) in queue.categories() {
            prop_assert!(mask.matches(category));
            prop_assert!(category.is_single());
            for record in list {
                prop_assert_eq!(classify(record, &registry).category(), category);
            }
            counted += list.len();
        }
        for category in [Category::DL_F_U_MIME, Category::DL_F_B_MIME] {
            let buckets = queue.get_map(category).unwrap();
            if !buckets.is_empty() {
                prop_assert!(mask.matches(category));
            }
            counted += buckets.values().map(Vec::len).sum::<usize>();
        }
        prop_assert_eq!(counted, queue.queue_size());

        let expected_retained = records
            .iter()
            .filter(|r| mask.matches(classify(r, &registry).category()))
            .count();
        prop_assert_eq!(queue.queue_size(), expected_retained);
    }

    #[test]
    fn totals_and_priority_cover_retained_uncompleted(
        records in proptest::collection::vec(arb_record(), 0..40),
        mask in arb_mask(),
    ) {
        let registry = FilterRegistry::builtin();
        let source = StaticSource::new(records.clone());
        let queue = RequestQueue::new(mask, &source).unwrap();

        let retained_uncompleted: Vec<&Record> = records
            .iter()
            .filter(|r| {
                let category = classify(r, &registry).category();
                mask.matches(category) && is_uncompleted(category)
            })
            .collect();

        let mut download_bytes = 0;
        let mut upload_bytes = 0;
        for record in &retained_uncompleted {
            match record {
                Record::Download(r) => download_bytes += r.data_size.unwrap_or(0),
                Record::UploadFile(r) => upload_bytes += r.data_size.unwrap_or(0),
                Record::UploadDir(r) => upload_bytes += r.total_data_size.unwrap_or(0),
            }
        }
        prop_assert_eq!(queue.total_download_bytes(), download_bytes);
        prop_assert_eq!(queue.total_upload_bytes(), upload_bytes);

        let lowest = queue.lowest_queued_priority();
        match retained_uncompleted.iter().map(|r| r.priority()).min() {
            Some(min) => prop_assert_eq!(lowest, min),
            None => prop_assert_eq!(lowest, Priority::PAUSED),
        }
    }

    #[test]
    fn accessors_are_idempotent(
        records in proptest::collection::vec(arb_record(), 0..20),
        mask in arb_mask(),
    ) {
        let source = StaticSource::new(records);
        let queue = RequestQueue::new(mask, &source).unwrap();

        for category in DOWNLOAD_CATEGORIES.into_iter().chain(UPLOAD_CATEGORIES) {
            let first = queue.get(category).unwrap();
            let second = queue.get(category).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
