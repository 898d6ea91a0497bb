// Dweve Whois Stream - Incremental query result streaming
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Property tests for attribute cleaning and object mapping.

use proptest::prelude::*;
use whois_core::{ObjectMapper, RpslAttribute, RpslObject, WhoisObjectMapper};

proptest! {
    #[test]
    fn clean_value_has_no_comment_or_double_space(value in "[a-zA-Z0-9 #\\-\n]{0,64}") {
        let cleaned = RpslAttribute::new("descr", value).clean_value();
        prop_assert!(!cleaned.contains('#'));
        prop_assert!(!cleaned.contains("  "));
        prop_assert!(!cleaned.contains('\n'));
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }

    #[test]
    fn mapping_preserves_attribute_order(
        names in prop::collection::vec("[a-z]{1,8}", 0..16),
    ) {
        let mut pairs = vec![("mntner".to_string(), "TEST-MNT".to_string())];
        pairs.extend(names.iter().map(|n| (n.clone(), format!("value-{}", n))));
        pairs.push(("source".to_string(), "TEST".to_string()));

        let obj = RpslObject::from_pairs(pairs.clone());
        let mapped = WhoisObjectMapper::new("http://localhost").map(&obj, None).unwrap();

        let rendered: Vec<_> = mapped.attributes.attribute.iter().map(|a| a.name.clone()).collect();
        let expected: Vec<_> = pairs.into_iter().map(|(k, _)| k).collect();
        prop_assert_eq!(rendered, expected);
    }
}
