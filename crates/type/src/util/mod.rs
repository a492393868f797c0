// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

pub mod encoding;
