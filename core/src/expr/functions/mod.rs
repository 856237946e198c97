/*
 * Copyright (c) 2025. Mark Barrett
 * This file is part of Ottl.
 * Ottl is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
 * Ottl is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 * You should have received a copy of the GNU Affero General Public License along with Ottl. If not, see <https://www.gnu.org/licenses/>.
 */
pub mod concat;

pub use concat::concat;
